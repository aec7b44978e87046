//! roomjoin: calendar-driven meeting kiosk agent.
//!
//! Designed to be invoked periodically by an external scheduler (a systemd
//! timer or cron); each invocation runs one poll cycle to completion and
//! exits.

mod cli;
mod run;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

#[tokio::main]
async fn main() {
	init_tracing();

	let cli = cli::Cli::parse();
	if let Err(err) = run::dispatch(cli).await {
		error!(error = %format!("{err:#}"), "agent failed");
		std::process::exit(1);
	}
}
