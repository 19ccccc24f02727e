use anyhow::Context;
use clap::Parser;
use tracing::error;
use wish_cli::{cli::Cli, commands, config::WishConfig, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = run(cli).await {
		error!(target = "wish.cli", error = %format!("{err:#}"), "command failed");
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> anyhow::Result<()> {
	let config = WishConfig::load(cli.config.as_deref()).context("loading config")?;
	commands::dispatch(cli, config).await?;
	Ok(())
}
