//! CLI definition and configuration resolution.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use roomjoin::Config;

#[derive(Debug, Parser)]
#[command(name = "roomjoin", version, about = "Calendar-driven meeting kiosk agent")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	#[command(flatten)]
	pub options: Options,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
	/// Run one poll cycle: read the calendar and reconcile the session.
	Run,
	/// Report lockfile and browser liveness state as JSON.
	Status,
	/// Force a session teardown.
	Stop,
}

/// Every option also reads from the environment, so a systemd timer unit can
/// configure the agent without a command line.
#[derive(Debug, Args)]
pub struct Options {
	/// Calendar source: an http(s) URL or a local .ics path.
	#[arg(long, env = "ROOMJOIN_CALENDAR")]
	pub calendar: Option<String>,

	/// Browser executable used to join meetings.
	#[arg(long, env = "ROOMJOIN_BROWSER", default_value = "/usr/bin/firefox")]
	pub browser: PathBuf,

	/// Browser profile dedicated to meeting sessions.
	#[arg(long, env = "ROOMJOIN_PROFILE", default_value = "meetingroom")]
	pub profile: String,

	/// Lockfile recording the active meeting URL.
	#[arg(long, env = "ROOMJOIN_LOCKFILE", default_value = "/tmp/roomjoin.lock")]
	pub lockfile: PathBuf,

	/// Calendar fetch timeout in seconds.
	#[arg(long, env = "ROOMJOIN_TIMEOUT", default_value_t = 20.0)]
	pub timeout: f64,

	/// Base prepended to conference ids when building join URLs.
	#[arg(long, env = "ROOMJOIN_BASE_URL")]
	pub base_url: Option<String>,

	/// Display name presented in the meeting.
	#[arg(long, env = "ROOMJOIN_DISPLAY_NAME", default_value = "RoomJoiner")]
	pub display_name: String,
}

impl Options {
	/// Resolves the immutable agent configuration.
	pub fn to_config(&self) -> Result<Config> {
		let calendar = self
			.calendar
			.clone()
			.context("no calendar source configured; set --calendar or ROOMJOIN_CALENDAR")?;

		Ok(Config {
			browser: self.browser.clone(),
			profile: self.profile.clone(),
			lockfile: self.lockfile.clone(),
			calendar,
			fetch_timeout: Duration::from_secs_f64(self.timeout),
			base_url: self.base_url.clone(),
			display_name: self.display_name.clone(),
		})
	}
}
