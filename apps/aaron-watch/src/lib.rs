pub mod session;

use std::path::PathBuf;

use clap::Parser;

use crate::session::Session;

#[derive(Debug, Parser)]
#[command(
	version = aaron_cli::VERSION,
	rename_all = "kebab",
	styles = aaron_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Post this text as a user message once connected.
	#[arg(long, value_name = "TEXT")]
	pub say: Option<String>,
	/// Play the local demo sequence alongside the server traffic.
	#[arg(long)]
	pub demo: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = aaron_config::load(&args.config)?;
	let filter = aaron_cli::env_filter(&config.service.log_level);
	tracing_subscriber::fmt().with_env_filter(filter).init();

	let session = Session::start(&config.client)?;

	session.wait_connected().await;

	if let Some(text) = args.say.as_deref() {
		let message = session.say(text).await?;

		tracing::info!(message_id = %message.id, "Posted message.");
	}
	if args.demo {
		session.start_demo();
	}

	session.watch(shutdown_signal()).await;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %err, "Failed to listen for shutdown signal.");
		std::future::pending::<()>().await;
	}
}
