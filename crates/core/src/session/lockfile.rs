//! Lockfile persistence for the active meeting URL.
//!
//! The file's entire contents are the URL of the session believed active;
//! absence means idle. Contents are trimmed on read so a trailing newline
//! never defeats the relaunch short-circuit.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Handle on the single persisted session marker.
#[derive(Debug, Clone)]
pub struct Lockfile {
	path: PathBuf,
}

impl Lockfile {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn exists(&self) -> bool {
		self.path.exists()
	}

	/// Reads the recorded URL; `Ok(None)` when no lockfile is present.
	pub fn read(&self) -> Result<Option<String>> {
		match std::fs::read_to_string(&self.path) {
			Ok(contents) => Ok(Some(contents.trim().to_string())),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	/// Records `url` as the active session.
	pub fn write(&self, url: &str) -> Result<()> {
		std::fs::write(&self.path, url)?;
		Ok(())
	}

	/// Removes the marker; returns whether a file was actually removed.
	pub fn remove(&self) -> Result<bool> {
		match std::fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}
}
