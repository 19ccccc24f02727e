//! Command registry: operation names, aliases and execution.

use std::num::NonZeroU32;

use serde::de::DeserializeOwned;

use crate::commands::invocation::{CommentRaw, EmptyRaw, StatusRaw, UploadRaw};
use crate::error::{CliError, Result};
use crate::surface::WishSurface;

/// Every operation the surface accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
	Status,
	Upload,
	Like,
	Comment,
	Reset,
	Share,
}

const COMMANDS: &[(CommandId, &str, &[&str])] = &[
	(CommandId::Status, "status", &["st"]),
	(CommandId::Upload, "upload", &["up"]),
	(CommandId::Like, "like", &[]),
	(CommandId::Comment, "comment", &["c"]),
	(CommandId::Reset, "reset", &[]),
	(CommandId::Share, "share", &[]),
];

/// Finds a command by primary name or alias.
pub fn lookup_command(name: &str) -> Option<CommandId> {
	COMMANDS
		.iter()
		.find(|(_, primary, aliases)| *primary == name || aliases.contains(&name))
		.map(|(id, _, _)| *id)
}

pub fn command_name(id: CommandId) -> &'static str {
	COMMANDS.iter().find(|(candidate, _, _)| *candidate == id).map(|(_, name, _)| *name).unwrap_or("unknown")
}

fn parse_args<T: DeserializeOwned>(args: serde_json::Value) -> Result<T> {
	let args = if args.is_null() { serde_json::json!({}) } else { args };
	serde_json::from_value(args).map_err(|err| CliError::InvalidInput(format!("invalid input: {err}")))
}

/// Runs one command against the surface and returns its payload.
pub async fn run_command(surface: &mut WishSurface, id: CommandId, args: serde_json::Value) -> Result<serde_json::Value> {
	match id {
		CommandId::Status => {
			let raw: StatusRaw = parse_args(args)?;
			surface.status(raw.photo)
		}
		CommandId::Upload => {
			let raw: UploadRaw = parse_args(args)?;
			let goal = resolve_goal(&raw, surface.config().default_goal)?;
			surface.upload(&raw.file, goal).await
		}
		CommandId::Like => {
			let _: EmptyRaw = parse_args(args)?;
			surface.like()
		}
		CommandId::Comment => {
			let raw: CommentRaw = parse_args(args)?;
			surface.comment(&raw.text)
		}
		CommandId::Reset => {
			let _: EmptyRaw = parse_args(args)?;
			surface.reset()
		}
		CommandId::Share => {
			let _: EmptyRaw = parse_args(args)?;
			surface.share()
		}
	}
}

/// Picks the like goal for an upload. Zero is rejected here so the
/// session never sees a non-positive goal.
fn resolve_goal(raw: &UploadRaw, default_goal: NonZeroU32) -> Result<Option<NonZeroU32>> {
	if raw.no_goal {
		return Ok(None);
	}
	match raw.goal {
		Some(goal) => NonZeroU32::new(goal)
			.map(Some)
			.ok_or_else(|| CliError::InvalidInput("like goal must be a positive integer".into())),
		None => Ok(Some(default_goal)),
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::*;

	fn upload(goal: Option<u32>, no_goal: bool) -> UploadRaw {
		UploadRaw {
			file: PathBuf::from("cake.png"),
			goal,
			no_goal,
		}
	}

	#[test]
	fn lookup_command_by_primary_name() {
		assert_eq!(lookup_command("status"), Some(CommandId::Status));
		assert_eq!(lookup_command("upload"), Some(CommandId::Upload));
		assert_eq!(lookup_command("share"), Some(CommandId::Share));
	}

	#[test]
	fn lookup_command_by_alias() {
		assert_eq!(lookup_command("st"), Some(CommandId::Status));
		assert_eq!(lookup_command("c"), Some(CommandId::Comment));
	}

	#[test]
	fn lookup_command_unknown_returns_none() {
		assert_eq!(lookup_command("unknown"), None);
		assert_eq!(lookup_command(""), None);
		assert_eq!(lookup_command("likes"), None);
	}

	#[test]
	fn command_name_returns_primary() {
		assert_eq!(command_name(CommandId::Like), "like");
		assert_eq!(command_name(CommandId::Comment), "comment");
		assert_eq!(command_name(CommandId::Reset), "reset");
	}

	#[test]
	fn goal_resolution() {
		let default = NonZeroU32::new(50).unwrap();
		assert_eq!(resolve_goal(&upload(None, false), default).unwrap(), Some(default));
		assert_eq!(resolve_goal(&upload(Some(3), false), default).unwrap(), NonZeroU32::new(3).map(Some).unwrap());
		assert_eq!(resolve_goal(&upload(None, true), default).unwrap(), None);
		assert!(matches!(resolve_goal(&upload(Some(0), false), default), Err(CliError::InvalidInput(_))));
	}

	#[test]
	fn null_args_parse_as_empty_object() {
		let raw: StatusRaw = parse_args(serde_json::Value::Null).unwrap();
		assert!(!raw.photo);
		assert!(parse_args::<CommentRaw>(serde_json::json!({})).is_err());
	}
}
