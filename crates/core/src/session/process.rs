//! Process liveness and termination behind a portable trait.

use tracing::{debug, warn};

/// Boolean liveness oracle and best-effort terminator for external processes.
///
/// Implementations must never fail: liveness degrades to `false` and
/// termination is fire-and-forget, so the state machine stays decidable even
/// when process listing is unavailable.
pub trait ProcessController: Send + Sync {
	/// Returns `true` when any process matches `pattern`.
	fn any_matching(&self, pattern: &str) -> bool;

	/// Terminates all processes matching `pattern`, best-effort.
	fn terminate_matching(&self, pattern: &str);
}

/// Controller backed by the platform process-listing utilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProcessController;

impl ProcessController for OsProcessController {
	fn any_matching(&self, pattern: &str) -> bool {
		#[cfg(unix)]
		{
			use std::process::{Command, Stdio};

			Command::new("pgrep")
				.args(["-f", pattern])
				.stdout(Stdio::null())
				.stderr(Stdio::null())
				.status()
				.map(|status| status.success())
				.unwrap_or(false)
		}

		#[cfg(not(unix))]
		{
			warn!(pattern, "process liveness checks are not supported on this platform");
			false
		}
	}

	fn terminate_matching(&self, pattern: &str) {
		#[cfg(unix)]
		{
			use std::process::{Command, Stdio};

			match Command::new("pkill")
				.args(["-f", pattern])
				.stdout(Stdio::null())
				.stderr(Stdio::null())
				.status()
			{
				Ok(status) if status.success() => {}
				Ok(status) => debug!(pattern, %status, "pkill matched nothing"),
				Err(err) => warn!(pattern, error = %err, "failed to run pkill"),
			}
		}

		#[cfg(not(unix))]
		{
			warn!(pattern, "process termination is not supported on this platform");
		}
	}
}
