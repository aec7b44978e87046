//! Browser launch for meeting sessions.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{JoinError, Result};

/// Grace period during which an immediate browser exit counts as a failed
/// launch.
const LAUNCH_GRACE: Duration = Duration::from_secs(5);
const LAUNCH_POLL: Duration = Duration::from_millis(250);

/// Starts the external program that joins a meeting.
#[async_trait]
pub trait MeetingLauncher: Send + Sync {
	/// Launches a session at `url`; `Ok` means the process detached cleanly.
	async fn launch(&self, url: &str) -> Result<()>;
}

/// Launcher spawning a browser in kiosk mode under a dedicated profile.
#[derive(Debug, Clone)]
pub struct BrowserLauncher {
	browser: PathBuf,
	profile: String,
}

impl BrowserLauncher {
	pub fn new(browser: PathBuf, profile: String) -> Self {
		Self { browser, profile }
	}

	/// Arguments selecting the dedicated profile and full-screen mode.
	fn args(&self, url: &str) -> Vec<String> {
		vec![
			"-P".to_string(),
			self.profile.clone(),
			"--no-remote".to_string(),
			"--new-instance".to_string(),
			"--kiosk".to_string(),
			url.to_string(),
		]
	}
}

#[async_trait]
impl MeetingLauncher for BrowserLauncher {
	async fn launch(&self, url: &str) -> Result<()> {
		let args = self.args(url);
		info!(
			target = "roomjoin.session",
			browser = %self.browser.display(),
			profile = %self.profile,
			"launching browser"
		);

		let mut cmd = Command::new(&self.browser);
		cmd.args(&args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped());

		#[cfg(unix)]
		std::os::unix::process::CommandExt::process_group(&mut cmd, 0);

		let mut child = cmd
			.spawn()
			.map_err(|err| JoinError::Launch(format!("failed to spawn {}: {err}", self.browser.display())))?;

		let attempts = LAUNCH_GRACE.as_millis() / LAUNCH_POLL.as_millis();
		for _ in 0..attempts {
			tokio::time::sleep(LAUNCH_POLL).await;

			if let Ok(Some(status)) = child.try_wait() {
				let mut stderr_text = String::new();
				if let Some(mut stderr) = child.stderr.take() {
					let _ = stderr.read_to_string(&mut stderr_text);
				}
				let stderr_text = stderr_text.trim();
				let detail = if stderr_text.is_empty() {
					String::new()
				} else {
					format!("; stderr: {stderr_text}")
				};
				return Err(JoinError::Launch(format!(
					"browser exited during the launch grace period ({status}){detail}"
				)));
			}
		}

		debug!(target = "roomjoin.session", "browser still running after grace period; treating as detached");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_select_profile_kiosk_and_url() {
		let launcher = BrowserLauncher::new(PathBuf::from("/usr/bin/firefox"), "meetingroom".to_string());
		let args = launcher.args("https://meet.example.org/abc123");

		assert_eq!(
			args,
			vec![
				"-P",
				"meetingroom",
				"--no-remote",
				"--new-instance",
				"--kiosk",
				"https://meet.example.org/abc123",
			]
		);
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn missing_executable_is_a_launch_failure() {
		let launcher = BrowserLauncher::new(PathBuf::from("/nonexistent/browser"), "meetingroom".to_string());
		let err = launcher.launch("https://meet.example.org/abc123").await.unwrap_err();
		assert!(matches!(err, JoinError::Launch(_)));
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn immediate_exit_is_a_launch_failure() {
		// `false` ignores the browser-style arguments and exits right away.
		let launcher = BrowserLauncher::new(PathBuf::from("/bin/false"), "meetingroom".to_string());
		let err = launcher.launch("https://meet.example.org/abc123").await.unwrap_err();
		match err {
			JoinError::Launch(message) => assert!(message.contains("grace period")),
			other => panic!("unexpected error: {other}"),
		}
	}
}
