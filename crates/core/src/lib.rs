//! Calendar-driven meeting session engine.
//!
//! Polls a calendar feed, decides whether a meeting is currently active, and
//! drives a dedicated browser profile to match: launch when a joinable meeting
//! starts, tear down when it ends, leave everything alone in between. State
//! across invocations is carried by a single lockfile holding the active URL.

pub mod calendar;
pub mod config;
pub mod cycle;
pub mod error;
pub mod join_url;
pub mod schedule;
pub mod session;

pub use calendar::CalendarEvent;
pub use config::Config;
pub use cycle::run_cycle;
pub use error::{JoinError, Result};
pub use session::{MeetingLauncher, ProcessController, SessionMachine, SessionOutcome};
