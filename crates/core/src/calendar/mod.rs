//! Calendar feed reading and event normalization.
//!
//! This module owns the path from raw calendar bytes to comparable events:
//! source fetch, iCalendar parsing, and conversion of event times into the
//! local timezone.

use chrono::{DateTime, Local};

pub mod ics;
pub mod source;
pub mod times;

pub use source::fetch;

const CONFERENCE_ID_PROPERTY: &str = "X-CONFERENCE-ID";

/// A calendar event with both bounds normalized to local time.
///
/// Only events that survive normalization appear here: both bounds present,
/// `start < end`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
	pub start: DateTime<Local>,
	pub end: DateTime<Local>,
	pub conference_id: Option<String>,
}

/// Converts parsed components into comparable events.
///
/// Events with a missing or non-instant bound (all-day entries included) and
/// events whose interval is empty or inverted are dropped here, before any
/// selection happens.
pub fn collect_events(components: &[ics::VEvent]) -> Vec<CalendarEvent> {
	components
		.iter()
		.filter_map(|event| {
			let start = event.property("DTSTART").and_then(times::normalize)?;
			let end = event.property("DTEND").and_then(times::normalize)?;
			if start >= end {
				return None;
			}

			let conference_id = event
				.property(CONFERENCE_ID_PROPERTY)
				.map(|prop| prop.value.trim().to_string())
				.filter(|id| !id.is_empty());

			Some(CalendarEvent { start, end, conference_id })
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(raw: &str) -> Vec<ics::VEvent> {
		ics::parse_events(raw.as_bytes()).unwrap()
	}

	#[test]
	fn collect_keeps_events_with_both_bounds() {
		let components = parse(
			"BEGIN:VCALENDAR\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART:20260304T090000\r\n\
			 DTEND:20260304T100000\r\n\
			 x-conference-id:abc123\r\n\
			 END:VEVENT\r\n\
			 END:VCALENDAR\r\n",
		);

		let events = collect_events(&components);
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].conference_id.as_deref(), Some("abc123"));
		assert!(events[0].start < events[0].end);
	}

	#[test]
	fn collect_drops_events_missing_a_bound() {
		let components = parse(
			"BEGIN:VCALENDAR\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART:20260304T090000\r\n\
			 END:VEVENT\r\n\
			 END:VCALENDAR\r\n",
		);

		assert!(collect_events(&components).is_empty());
	}

	#[test]
	fn collect_drops_inverted_and_empty_intervals() {
		let components = parse(
			"BEGIN:VCALENDAR\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART:20260304T100000\r\n\
			 DTEND:20260304T090000\r\n\
			 END:VEVENT\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART:20260304T090000\r\n\
			 DTEND:20260304T090000\r\n\
			 END:VEVENT\r\n\
			 END:VCALENDAR\r\n",
		);

		assert!(collect_events(&components).is_empty());
	}

	#[test]
	fn collect_drops_all_day_events() {
		let components = parse(
			"BEGIN:VCALENDAR\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART;VALUE=DATE:20260304\r\n\
			 DTEND;VALUE=DATE:20260305\r\n\
			 END:VEVENT\r\n\
			 END:VCALENDAR\r\n",
		);

		assert!(collect_events(&components).is_empty());
	}

	#[test]
	fn collect_treats_blank_conference_id_as_absent() {
		let components = parse(
			"BEGIN:VCALENDAR\r\n\
			 BEGIN:VEVENT\r\n\
			 DTSTART:20260304T090000\r\n\
			 DTEND:20260304T100000\r\n\
			 X-CONFERENCE-ID:\r\n\
			 END:VEVENT\r\n\
			 END:VCALENDAR\r\n",
		);

		let events = collect_events(&components);
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].conference_id, None);
	}
}
