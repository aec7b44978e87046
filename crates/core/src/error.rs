//! Error types shared across the engine.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, JoinError>;

/// Failure taxonomy for a poll cycle.
#[derive(Debug, Error)]
pub enum JoinError {
	/// Required configuration is missing or unusable.
	#[error("configuration error: {0}")]
	Config(String),

	/// The calendar URL could not be fetched within the configured timeout.
	#[error("calendar source unreachable: {0}")]
	SourceUnreachable(String),

	/// The calendar file could not be opened or read.
	#[error("calendar source unreadable: {path}: {source}")]
	SourceUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The fetched bytes are not an iCalendar document.
	#[error("calendar parse error: {0}")]
	CalendarParse(String),

	/// The browser could not be spawned, or exited during the launch grace
	/// period.
	#[error("launch failure: {0}")]
	Launch(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
