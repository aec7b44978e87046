//! Lockfile-backed session state machine.
//!
//! The machine owns the persisted "current session" marker and decides, once
//! per poll, whether to start a session, stop one, or leave everything alone.
//! It self-heals against stale state left behind by a crashed browser or an
//! unclean shutdown.

use tracing::{info, warn};

mod launcher;
mod lockfile;
mod process;

pub use launcher::{BrowserLauncher, MeetingLauncher};
pub use lockfile::Lockfile;
pub use process::{OsProcessController, ProcessController};

/// What one decision pass did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
	/// Nothing active and nothing desired.
	Idle,
	/// The lockfile already records the desired URL; no relaunch.
	AlreadyJoined,
	/// An active session was torn down.
	Stopped,
	/// A new session was started.
	Launched,
	/// A launch was attempted and failed; state was rolled back.
	LaunchFailed,
	/// The lockfile could not be consulted or updated; decision deferred to
	/// the next poll.
	Deferred,
}

/// Session state machine over a lockfile, a liveness oracle, and a launcher.
pub struct SessionMachine<'a> {
	lock: Lockfile,
	pattern: String,
	procs: &'a dyn ProcessController,
	launcher: &'a dyn MeetingLauncher,
}

impl<'a> SessionMachine<'a> {
	pub fn new(
		lock: Lockfile,
		pattern: String,
		procs: &'a dyn ProcessController,
		launcher: &'a dyn MeetingLauncher,
	) -> Self {
		Self {
			lock,
			pattern,
			procs,
			launcher,
		}
	}

	/// Heals stale state: a lockfile with no matching live process is removed.
	///
	/// Returns whether a stale lockfile was removed. A failed removal leaves
	/// the machine conservative (the session still counts as active, so no
	/// double-launch can follow).
	pub fn cleanup_stale(&self) -> bool {
		if !self.lock.exists() {
			return false;
		}
		if self.procs.any_matching(&self.pattern) {
			return false;
		}

		match self.lock.remove() {
			Ok(removed) => {
				if removed {
					info!(
						target = "roomjoin.session",
						path = %self.lock.path().display(),
						"stale lockfile removed (no matching browser process)"
					);
				}
				removed
			}
			Err(err) => {
				warn!(
					target = "roomjoin.session",
					path = %self.lock.path().display(),
					error = %err,
					"could not remove stale lockfile"
				);
				false
			}
		}
	}

	/// Tears the session down: best-effort kill, best-effort lockfile removal.
	///
	/// Idempotent and safe to call on an already-idle state.
	pub fn stop(&self) {
		if self.procs.any_matching(&self.pattern) {
			self.procs.terminate_matching(&self.pattern);
			info!(target = "roomjoin.session", "meeting browser terminated");
		}

		match self.lock.remove() {
			Ok(true) => info!(target = "roomjoin.session", "lockfile removed"),
			Ok(false) => {}
			Err(err) => warn!(
				target = "roomjoin.session",
				path = %self.lock.path().display(),
				error = %err,
				"could not remove lockfile"
			),
		}
	}

	/// Drives the session toward `desired`, the URL the poll concluded should
	/// be active (or `None` for "no joinable meeting").
	pub async fn apply(&self, desired: Option<&str>) -> SessionOutcome {
		let Some(url) = desired else {
			if self.lock.exists() || self.procs.any_matching(&self.pattern) {
				self.stop();
				return SessionOutcome::Stopped;
			}
			return SessionOutcome::Idle;
		};

		let current = match self.lock.read() {
			Ok(current) => current,
			Err(err) => {
				// An unreadable lockfile is no evidence the session is wrong;
				// leave state untouched and let the next poll retry.
				warn!(
					target = "roomjoin.session",
					path = %self.lock.path().display(),
					error = %err,
					"lockfile unreadable; leaving session untouched"
				);
				return SessionOutcome::Deferred;
			}
		};

		if current.as_deref() == Some(url) {
			info!(target = "roomjoin.session", "already joined to this meeting");
			return SessionOutcome::AlreadyJoined;
		}

		self.stop();

		if let Err(err) = self.lock.write(url) {
			warn!(
				target = "roomjoin.session",
				path = %self.lock.path().display(),
				error = %err,
				"could not write lockfile; launch skipped"
			);
			return SessionOutcome::Deferred;
		}

		match self.launcher.launch(url).await {
			Ok(()) => {
				info!(target = "roomjoin.session", %url, "meeting session started");
				SessionOutcome::Launched
			}
			Err(err) => {
				// A lockfile pointing at a session that never started would
				// wrongly suppress future launches.
				warn!(target = "roomjoin.session", error = %err, "launch failed; rolling session state back");
				self.stop();
				SessionOutcome::LaunchFailed
			}
		}
	}
}
