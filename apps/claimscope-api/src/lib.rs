pub mod routes;
pub mod state;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use claimscope_config::Config;

use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(
	version = claimscope_cli::VERSION,
	rename_all = "kebab",
	styles = claimscope_cli::styles(),
)]
pub struct Args {
	/// Path to the TOML configuration file.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = claimscope_config::load(&args.config)?;

	init_tracing(&config);

	let http_addr = http_addr(&config)?;
	let state = AppState::new(config).await?;
	let app = routes::router(state);
	let listener = TcpListener::bind(http_addr).await?;

	tracing::info!(%http_addr, "HTTP server listening.");

	axum::serve(listener, app).await?;

	Ok(())
}

/// Parses `service.http_bind`, enforcing loopback when `bind_localhost_only` is set.
pub fn http_addr(config: &Config) -> color_eyre::Result<SocketAddr> {
	let addr: SocketAddr = config.service.http_bind.parse()?;

	if config.security.bind_localhost_only && !addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"http_bind must be a loopback address when bind_localhost_only is true."
		));
	}

	Ok(addr)
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
