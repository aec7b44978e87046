//! Event time normalization into the local timezone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::ics::Property;

/// Normalizes a `DTSTART`/`DTEND` property into a local instant.
///
/// Date-only values (all-day events) and every shape that cannot be resolved
/// to an unambiguous instant yield `None`. Naive timestamps are read as local
/// wall-clock time; zoned and UTC timestamps are converted to local time.
/// This function is total: it never fails, it only declines.
pub fn normalize(prop: &Property) -> Option<DateTime<Local>> {
	if prop.param("VALUE").is_some_and(|kind| kind.eq_ignore_ascii_case("DATE")) {
		return None;
	}

	let value = prop.value.trim();

	if let Some(tzid) = prop.param("TZID") {
		let zone: Tz = tzid.parse().ok()?;
		let naive = parse_naive(value)?;
		return zone
			.from_local_datetime(&naive)
			.earliest()
			.map(|instant| instant.with_timezone(&Local));
	}

	if let Some(stripped) = value.strip_suffix('Z') {
		let naive = parse_naive(stripped)?;
		return Some(Utc.from_utc_datetime(&naive).with_timezone(&Local));
	}

	let naive = parse_naive(value)?;
	Local.from_local_datetime(&naive).earliest()
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
	NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()
}

#[cfg(test)]
mod tests {
	use chrono::Timelike;

	use super::*;

	fn prop(value: &str, params: &[(&str, &str)]) -> Property {
		Property {
			name: "DTSTART".to_string(),
			params: params
				.iter()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
			value: value.to_string(),
		}
	}

	#[test]
	fn date_only_values_are_not_instants() {
		assert_eq!(normalize(&prop("20260304", &[("VALUE", "DATE")])), None);
		assert_eq!(normalize(&prop("20260304", &[])), None);
	}

	#[test]
	fn naive_timestamps_are_read_as_local_time() {
		let instant = normalize(&prop("20260304T091500", &[])).unwrap();
		assert_eq!(instant.hour(), 9);
		assert_eq!(instant.minute(), 15);
	}

	#[test]
	fn utc_timestamps_are_converted_to_local() {
		let instant = normalize(&prop("20260304T140000Z", &[])).unwrap();
		let expected = Utc
			.with_ymd_and_hms(2026, 3, 4, 14, 0, 0)
			.unwrap()
			.with_timezone(&Local);
		assert_eq!(instant, expected);
	}

	#[test]
	fn zoned_timestamps_are_converted_to_local() {
		let instant = normalize(&prop("20260304T150000", &[("TZID", "Europe/Paris")])).unwrap();
		let expected = chrono_tz::Europe::Paris
			.with_ymd_and_hms(2026, 3, 4, 15, 0, 0)
			.unwrap()
			.with_timezone(&Local);
		assert_eq!(instant, expected);
	}

	#[test]
	fn unknown_zones_and_garbage_degrade_to_none() {
		assert_eq!(normalize(&prop("20260304T150000", &[("TZID", "Mars/Olympus")])), None);
		assert_eq!(normalize(&prop("not-a-time", &[])), None);
		assert_eq!(normalize(&prop("", &[])), None);
	}
}
