//! Minimal iCalendar (RFC 5545) component parser.
//!
//! Only what the agent consumes is modeled: `VEVENT` blocks as flat property
//! maps. Property and parameter names are case-insensitive per the RFC and are
//! stored uppercased so lookups cover every casing a feed may use. Unknown
//! components and properties are skipped, not errors.

use crate::error::{JoinError, Result};

/// A single content line: `NAME[;PARAM=VALUE…]:VALUE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
	/// Property name, uppercased.
	pub name: String,
	/// Parameters, names uppercased, values with surrounding quotes removed.
	pub params: Vec<(String, String)>,
	/// Raw property value.
	pub value: String,
}

impl Property {
	/// Returns the value of parameter `name`, matched case-insensitively.
	pub fn param(&self, name: &str) -> Option<&str> {
		let wanted = name.to_ascii_uppercase();
		self.params
			.iter()
			.find(|(param, _)| *param == wanted)
			.map(|(_, value)| value.as_str())
	}
}

/// An event block with its properties in document order.
#[derive(Debug, Clone, Default)]
pub struct VEvent {
	properties: Vec<Property>,
}

impl VEvent {
	/// Returns the first property named `name`, matched case-insensitively.
	pub fn property(&self, name: &str) -> Option<&Property> {
		let wanted = name.to_ascii_uppercase();
		self.properties.iter().find(|prop| prop.name == wanted)
	}
}

/// Parses calendar bytes into the `VEVENT` components they contain.
///
/// Fails only when the bytes are not an iCalendar document at all; malformed
/// lines inside an otherwise valid document are skipped.
pub fn parse_events(data: &[u8]) -> Result<Vec<VEvent>> {
	let text = String::from_utf8_lossy(data);

	let mut events = Vec::new();
	let mut stack: Vec<String> = Vec::new();
	let mut current: Option<VEvent> = None;
	let mut saw_calendar = false;

	for line in unfold(&text) {
		let Some(prop) = parse_content_line(&line) else {
			continue;
		};

		match prop.name.as_str() {
			"BEGIN" => {
				let kind = prop.value.trim().to_ascii_uppercase();
				if kind == "VCALENDAR" {
					saw_calendar = true;
				}
				if kind == "VEVENT" {
					current = Some(VEvent::default());
				}
				stack.push(kind);
			}
			"END" => {
				let kind = prop.value.trim().to_ascii_uppercase();
				if kind == "VEVENT" {
					if let Some(event) = current.take() {
						events.push(event);
					}
				}
				stack.pop();
			}
			_ => {
				// Nested components (VALARM) must not leak into the event.
				if stack.last().map(String::as_str) == Some("VEVENT") {
					if let Some(event) = current.as_mut() {
						event.properties.push(prop);
					}
				}
			}
		}
	}

	if !saw_calendar {
		return Err(JoinError::CalendarParse("no VCALENDAR component found".to_string()));
	}

	Ok(events)
}

/// Reassembles folded content lines (continuations start with a space or tab).
fn unfold(text: &str) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	for raw in text.lines() {
		if raw.starts_with(' ') || raw.starts_with('\t') {
			if let Some(last) = lines.last_mut() {
				last.push_str(&raw[1..]);
				continue;
			}
		}
		lines.push(raw.to_string());
	}
	lines
}

/// Splits one unfolded line into a property, honoring quoted parameter values.
fn parse_content_line(line: &str) -> Option<Property> {
	let mut in_quotes = false;
	let mut colon = None;
	for (idx, ch) in line.char_indices() {
		match ch {
			'"' => in_quotes = !in_quotes,
			':' if !in_quotes => {
				colon = Some(idx);
				break;
			}
			_ => {}
		}
	}

	let colon = colon?;
	let head = &line[..colon];
	let value = line[colon + 1..].to_string();

	let mut segments = split_unquoted(head, ';').into_iter();
	let name = segments.next()?.trim().to_ascii_uppercase();
	if name.is_empty() {
		return None;
	}

	let params = segments
		.filter_map(|segment| {
			let (param, param_value) = segment.split_once('=')?;
			Some((
				param.trim().to_ascii_uppercase(),
				param_value.trim().trim_matches('"').to_string(),
			))
		})
		.collect();

	Some(Property { name, params, value })
}

fn split_unquoted(input: &str, separator: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut buffer = String::new();
	let mut in_quotes = false;
	for ch in input.chars() {
		match ch {
			'"' => {
				in_quotes = !in_quotes;
				buffer.push(ch);
			}
			c if c == separator && !in_quotes => {
				parts.push(std::mem::take(&mut buffer));
			}
			c => buffer.push(c),
		}
	}
	parts.push(buffer);
	parts
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_events_with_parameters() {
		let events = parse_events(
			b"BEGIN:VCALENDAR\r\n\
			  VERSION:2.0\r\n\
			  BEGIN:VEVENT\r\n\
			  DTSTART;TZID=Europe/Paris:20260304T090000\r\n\
			  DTEND;TZID=Europe/Paris:20260304T100000\r\n\
			  SUMMARY:Weekly sync\r\n\
			  END:VEVENT\r\n\
			  END:VCALENDAR\r\n",
		)
		.unwrap();

		assert_eq!(events.len(), 1);
		let start = events[0].property("DTSTART").unwrap();
		assert_eq!(start.value, "20260304T090000");
		assert_eq!(start.param("tzid"), Some("Europe/Paris"));
	}

	#[test]
	fn property_lookup_is_case_insensitive() {
		let events = parse_events(
			b"BEGIN:VCALENDAR\r\n\
			  BEGIN:VEVENT\r\n\
			  x-conference-id:room-42\r\n\
			  END:VEVENT\r\n\
			  END:VCALENDAR\r\n",
		)
		.unwrap();

		assert_eq!(events[0].property("X-CONFERENCE-ID").unwrap().value, "room-42");
		assert_eq!(events[0].property("x-conference-id").unwrap().value, "room-42");
	}

	#[test]
	fn unfolds_continuation_lines() {
		let events = parse_events(
			b"BEGIN:VCALENDAR\r\n\
			  BEGIN:VEVENT\r\n\
			  SUMMARY:A meeting with a very long\r\n\
			  \x20, folded title\r\n\
			  END:VEVENT\r\n\
			  END:VCALENDAR\r\n",
		)
		.unwrap();

		assert_eq!(
			events[0].property("SUMMARY").unwrap().value,
			"A meeting with a very long, folded title"
		);
	}

	#[test]
	fn nested_alarm_properties_do_not_leak_into_the_event() {
		let events = parse_events(
			b"BEGIN:VCALENDAR\r\n\
			  BEGIN:VEVENT\r\n\
			  DTSTART:20260304T090000\r\n\
			  BEGIN:VALARM\r\n\
			  TRIGGER:-PT15M\r\n\
			  END:VALARM\r\n\
			  DTEND:20260304T100000\r\n\
			  END:VEVENT\r\n\
			  END:VCALENDAR\r\n",
		)
		.unwrap();

		assert_eq!(events.len(), 1);
		assert!(events[0].property("TRIGGER").is_none());
		assert!(events[0].property("DTEND").is_some());
	}

	#[test]
	fn quoted_parameters_may_contain_separators() {
		let events = parse_events(
			b"BEGIN:VCALENDAR\r\n\
			  BEGIN:VEVENT\r\n\
			  ORGANIZER;CN=\"Doe; Jane\":mailto:jane@example.org\r\n\
			  END:VEVENT\r\n\
			  END:VCALENDAR\r\n",
		)
		.unwrap();

		let organizer = events[0].property("ORGANIZER").unwrap();
		assert_eq!(organizer.param("CN"), Some("Doe; Jane"));
		assert_eq!(organizer.value, "mailto:jane@example.org");
	}

	#[test]
	fn rejects_bytes_without_a_calendar_wrapper() {
		let err = parse_events(b"just some text\r\n").unwrap_err();
		assert!(matches!(err, JoinError::CalendarParse(_)));
	}
}
