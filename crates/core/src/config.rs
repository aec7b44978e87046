//! Immutable agent configuration resolved once at startup.

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved configuration, passed by reference into every component.
#[derive(Debug, Clone)]
pub struct Config {
	/// Browser executable used to join meetings.
	pub browser: PathBuf,
	/// Browser profile dedicated to meeting sessions.
	pub profile: String,
	/// Lockfile recording the URL of the session believed active.
	pub lockfile: PathBuf,
	/// Calendar source: an http(s) URL or a local file path.
	pub calendar: String,
	/// Timeout applied to calendar fetches.
	pub fetch_timeout: Duration,
	/// Base prepended to conference ids when building join URLs.
	pub base_url: Option<String>,
	/// Name shown to other meeting participants.
	pub display_name: String,
}

impl Config {
	/// Process-listing pattern matching the browser launched for this profile.
	pub fn process_pattern(&self) -> String {
		let exe = self
			.browser
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| self.browser.display().to_string());
		format!("{exe}.*-P {}", self.profile)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn process_pattern_uses_executable_basename() {
		let config = Config {
			browser: PathBuf::from("/usr/lib/firefox/firefox"),
			profile: "meetingroom".to_string(),
			lockfile: PathBuf::from("/tmp/roomjoin.lock"),
			calendar: "https://calendar.example/feed.ics".to_string(),
			fetch_timeout: Duration::from_secs(20),
			base_url: None,
			display_name: "RoomJoiner".to_string(),
		};

		assert_eq!(config.process_pattern(), "firefox.*-P meetingroom");
	}
}
