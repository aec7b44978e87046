//! Subcommand execution.

use anyhow::Result;
use roomjoin::session::{BrowserLauncher, Lockfile, OsProcessController, ProcessController};
use roomjoin::{Config, run_cycle};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Commands};

pub async fn dispatch(cli: Cli) -> Result<()> {
	let config = cli.options.to_config()?;

	match cli.command.unwrap_or(Commands::Run) {
		Commands::Run => run_once(&config).await,
		Commands::Status => status(&config),
		Commands::Stop => stop(&config),
	}
}

/// One poll cycle. Launch failures are recovered inside the cycle and exit
/// cleanly; configuration and calendar failures propagate to a non-zero exit.
async fn run_once(config: &Config) -> Result<()> {
	log_environment();

	let procs = OsProcessController;
	let launcher = BrowserLauncher::new(config.browser.clone(), config.profile.clone());
	let outcome = run_cycle(config, &procs, &launcher).await?;

	info!(?outcome, "poll cycle complete");
	Ok(())
}

/// Reports the persisted marker and the liveness oracle side by side, so an
/// operator can spot stale or orphaned state at a glance.
fn status(config: &Config) -> Result<()> {
	let lock = Lockfile::new(config.lockfile.clone());
	let url = match lock.read() {
		Ok(url) => url,
		Err(err) => {
			warn!(error = %err, path = %config.lockfile.display(), "lockfile unreadable");
			None
		}
	};
	let alive = OsProcessController.any_matching(&config.process_pattern());

	let state = match (url.is_some(), alive) {
		(false, false) => "idle",
		(true, true) => "active",
		(true, false) => "stale",
		(false, true) => "orphaned",
	};

	let payload = json!({
		"lockfile": config.lockfile,
		"url": url,
		"browser_alive": alive,
		"state": state,
	});
	println!("{}", serde_json::to_string_pretty(&payload)?);
	Ok(())
}

fn stop(config: &Config) -> Result<()> {
	let procs = OsProcessController;
	let pattern = config.process_pattern();
	let lock = Lockfile::new(config.lockfile.clone());

	if procs.any_matching(&pattern) {
		procs.terminate_matching(&pattern);
		info!("meeting browser terminated");
	}
	let removed = match lock.remove() {
		Ok(removed) => removed,
		Err(err) => {
			warn!(error = %err, path = %config.lockfile.display(), "could not remove lockfile");
			false
		}
	};

	println!("{}", json!({ "stopped": true, "lockfile_removed": removed }));
	Ok(())
}

/// Records the display-related environment the browser will inherit; the
/// usual suspect when a kiosk launch dies instantly.
fn log_environment() {
	let wayland = std::env::var("WAYLAND_DISPLAY").unwrap_or_default();
	let display_var = std::env::var("DISPLAY").unwrap_or_default();
	let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_default();
	debug!(%wayland, display = %display_var, %runtime_dir, "display environment");
}
