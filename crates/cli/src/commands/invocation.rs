//! Command invocation adapter for CLI enum variants.
//!
//! Converts clap-parsed CLI enums into registry command IDs plus JSON
//! payloads, the same shape batch requests carry in their `input` field.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::Commands;
use crate::commands::registry::CommandId;
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusRaw {
	#[serde(default)]
	pub(crate) photo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadRaw {
	pub(crate) file: PathBuf,
	#[serde(default)]
	pub(crate) goal: Option<u32>,
	#[serde(default)]
	pub(crate) no_goal: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommentRaw {
	pub(crate) text: String,
}

/// Input for commands that take no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct EmptyRaw {}

/// Registry target with serialized command args.
#[derive(Debug, Clone)]
pub(crate) struct CommandInvocation {
	pub(crate) id: CommandId,
	pub(crate) args: serde_json::Value,
}

fn invocation<T: Serialize>(id: CommandId, raw: T) -> Result<CommandInvocation> {
	Ok(CommandInvocation {
		id,
		args: serde_json::to_value(raw)?,
	})
}

/// Converts a parsed CLI command into a registry invocation.
///
/// Returns `Ok(None)` for `batch`, which is not a registry command.
pub(crate) fn from_cli_command(command: Commands) -> Result<Option<CommandInvocation>> {
	use CommandId as Id;

	let invocation = match command {
		Commands::Status { photo } => invocation(Id::Status, StatusRaw { photo })?,
		Commands::Upload { file, goal, no_goal } => invocation(Id::Upload, UploadRaw { file, goal, no_goal })?,
		Commands::Like => invocation(Id::Like, EmptyRaw {})?,
		Commands::Comment { text } => invocation(Id::Comment, CommentRaw { text })?,
		Commands::Reset => invocation(Id::Reset, EmptyRaw {})?,
		Commands::Share => invocation(Id::Share, EmptyRaw {})?,
		Commands::Batch => return Ok(None),
	};

	Ok(Some(invocation))
}
