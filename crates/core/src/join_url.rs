//! Join URL derivation from event metadata.

use tracing::debug;

use crate::calendar::CalendarEvent;
use crate::config::Config;
use crate::error::{JoinError, Result};

/// Derives the join URL for a selected event.
///
/// Returns `Ok(None)` when the event carries no conference id: an active
/// meeting without a joinable link, which callers treat like no meeting at
/// all. A present id with no configured base is a configuration error, not a
/// silently broken URL.
pub fn derive(event: &CalendarEvent, config: &Config) -> Result<Option<String>> {
	let Some(id) = event.conference_id.as_deref() else {
		debug!(target = "roomjoin.url", "active event has no conference id");
		return Ok(None);
	};

	let base = config
		.base_url
		.as_deref()
		.filter(|base| !base.is_empty())
		.ok_or_else(|| {
			JoinError::Config("join URL base is not configured but the event has a conference id".to_string())
		})?;

	let display_name = urlencoding::encode(&config.display_name);
	Ok(Some(format!(
		"{base}{id}#userInfo.displayName=\"{display_name}\"\
		 &config.prejoinConfig.enabled=false\
		 &config.startWithAudioMuted=false\
		 &config.startWithVideoMuted=false"
	)))
}
