//! Active event selection.

use chrono::{DateTime, Local};

use crate::calendar::CalendarEvent;

/// Returns the event whose half-open interval `[start, end)` contains `now`.
///
/// Events are ordered by start time with a stable sort, so among overlapping
/// active events the earliest-starting one wins, and events sharing a start
/// keep their calendar enumeration order. No qualifying event is a normal
/// outcome, not an error.
pub fn active_event(events: &[CalendarEvent], now: DateTime<Local>) -> Option<&CalendarEvent> {
	let mut ordered: Vec<&CalendarEvent> = events.iter().collect();
	ordered.sort_by_key(|event| event.start);
	ordered.into_iter().find(|event| event.start <= now && now < event.end)
}
