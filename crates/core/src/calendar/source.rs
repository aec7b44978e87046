//! Calendar source access: one HTTP fetch or one file read per poll.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{JoinError, Result};

/// Fetches raw calendar bytes from a URL or a local path.
///
/// Source strings starting with `http` are fetched with a client bound by
/// `timeout`; anything else is read as a file. No retries: the caller decides
/// what a failed poll means.
pub async fn fetch(source: &str, timeout: Duration) -> Result<Vec<u8>> {
	if source.starts_with("http") {
		fetch_url(source, timeout).await
	} else {
		read_file(source)
	}
}

async fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<u8>> {
	let client = reqwest::Client::builder()
		.timeout(timeout)
		.build()
		.map_err(|err| JoinError::SourceUnreachable(format!("failed to create HTTP client: {err}")))?;

	let response = client
		.get(url)
		.send()
		.await
		.map_err(|err| JoinError::SourceUnreachable(err.to_string()))?;

	let status = response.status();
	if !status.is_success() {
		return Err(JoinError::SourceUnreachable(format!("unexpected status {status}")));
	}

	let bytes = response
		.bytes()
		.await
		.map_err(|err| JoinError::SourceUnreachable(err.to_string()))?;

	debug!(target = "roomjoin.calendar", bytes = bytes.len(), "calendar feed fetched");
	Ok(bytes.to_vec())
}

fn read_file(path: &str) -> Result<Vec<u8>> {
	std::fs::read(path).map_err(|err| JoinError::SourceUnreadable {
		path: PathBuf::from(path),
		source: err,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn reads_local_files() {
		let dir = tempfile::TempDir::new().unwrap();
		let path = dir.path().join("feed.ics");
		std::fs::write(&path, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

		let bytes = fetch(path.to_str().unwrap(), Duration::from_secs(1)).await.unwrap();
		assert!(bytes.starts_with(b"BEGIN:VCALENDAR"));
	}

	#[tokio::test]
	async fn missing_files_are_unreadable() {
		let err = fetch("/nonexistent/feed.ics", Duration::from_secs(1)).await.unwrap_err();
		assert!(matches!(err, JoinError::SourceUnreadable { .. }));
	}
}
