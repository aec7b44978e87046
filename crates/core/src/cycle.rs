//! One full poll cycle: read the calendar, decide, drive the session.

use chrono::Local;
use tracing::{info, warn};

use crate::calendar;
use crate::config::Config;
use crate::error::Result;
use crate::join_url;
use crate::schedule;
use crate::session::{Lockfile, MeetingLauncher, ProcessController, SessionMachine, SessionOutcome};

/// Runs a single run-to-completion cycle.
///
/// Stale state is healed first, so a crashed browser never blocks a new
/// launch. Calendar fetch/parse failures and a conference id with no
/// configured URL base are fail-safe: any active session is torn down before
/// the error propagates. A launch failure is recovered locally and reported
/// as a normal outcome.
pub async fn run_cycle(
	config: &Config,
	procs: &dyn ProcessController,
	launcher: &dyn MeetingLauncher,
) -> Result<SessionOutcome> {
	let machine = SessionMachine::new(
		Lockfile::new(config.lockfile.clone()),
		config.process_pattern(),
		procs,
		launcher,
	);

	machine.cleanup_stale();

	let bytes = match calendar::fetch(&config.calendar, config.fetch_timeout).await {
		Ok(bytes) => bytes,
		Err(err) => {
			warn!(error = %err, "calendar unavailable; tearing down any active session");
			machine.stop();
			return Err(err);
		}
	};

	let components = match calendar::ics::parse_events(&bytes) {
		Ok(components) => components,
		Err(err) => {
			warn!(error = %err, "calendar unparsable; tearing down any active session");
			machine.stop();
			return Err(err);
		}
	};

	let events = calendar::collect_events(&components);
	let now = Local::now();
	info!(events = events.len(), %now, "calendar read");

	let desired = match schedule::active_event(&events, now) {
		None => {
			info!("no active event");
			None
		}
		Some(event) => match join_url::derive(event, config) {
			Ok(url) => {
				if url.is_none() {
					info!("active event has no joinable link");
				}
				url
			}
			Err(err) => {
				warn!(error = %err, "cannot build join URL; tearing down any active session");
				machine.stop();
				return Err(err);
			}
		},
	};

	Ok(machine.apply(desired.as_deref()).await)
}
