pub(crate) mod batch;
pub(crate) mod invocation;
pub(crate) mod registry;

use std::time::Instant;

use crate::cli::Cli;
use crate::commands::registry::CommandId;
use crate::config::WishConfig;
use crate::error::{CliError, Result};
use crate::output::{DiagnosticLevel, OutputFormat, ResultBuilder, print_result};
use crate::surface::WishSurface;

/// Runs the parsed command line against the configured wish slot.
///
/// Failures are reported as an error envelope on stdout before being
/// returned, so scripted callers always get one result document.
pub async fn dispatch(cli: Cli, config: WishConfig) -> Result<()> {
	let format = cli.format;
	let invocation = invocation::from_cli_command(cli.command)?;
	let name = invocation.as_ref().map_or("batch", |invocation| registry::command_name(invocation.id));
	let start = Instant::now();

	let mut surface = match WishSurface::open(config, cli.store.as_deref()) {
		Ok(surface) => surface,
		Err(err) => return Err(report_failure(name, start, err, format)),
	};

	let Some(invocation) = invocation else {
		return batch::run_batch(&mut surface).await;
	};

	match registry::run_command(&mut surface, invocation.id, invocation.args).await {
		Ok(data) => {
			let mut builder = ResultBuilder::new(name).started_at(start).data(data).notification(surface.notification());
			if needs_active_wish(invocation.id) && surface.session().record().is_none() {
				builder = builder.diagnostic(DiagnosticLevel::Info, "no active wish; upload a photo first");
			}
			let result = builder.build();
			print_result(&result, format);
			Ok(())
		}
		Err(err) => Err(report_failure(name, start, err, format)),
	}
}

fn report_failure(name: &str, start: Instant, err: CliError, format: OutputFormat) -> CliError {
	let result = ResultBuilder::<serde_json::Value>::new(name).started_at(start).error(err.code(), err.to_string()).build();
	print_result(&result, format);
	err
}

fn needs_active_wish(id: CommandId) -> bool {
	matches!(id, CommandId::Like | CommandId::Comment | CommandId::Share)
}
