use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wish")]
#[command(about = "Share one photo wish for the day. It disappears after 24 hours.")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Toon)]
	pub format: OutputFormat,

	/// Slot file holding the wish (overrides config)
	#[arg(long, global = true, value_name = "FILE")]
	pub store: Option<PathBuf>,

	/// Config file (defaults to <config dir>/wish/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Show the current wish, the upload prompt, or the expiration notice
	#[command(alias = "st")]
	Status {
		/// Include the full encoded photo
		#[arg(long)]
		photo: bool,
	},

	/// Upload a photo as today's wish, replacing any existing one
	#[command(alias = "up")]
	Upload {
		/// Image file to upload
		file: PathBuf,
		/// Like goal (defaults to the configured goal)
		#[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "no_goal")]
		goal: Option<u32>,
		/// No like goal: likes are unlimited
		#[arg(long)]
		no_goal: bool,
	},

	/// Like the wish
	Like,

	/// Comment on the wish
	#[command(alias = "c")]
	Comment {
		/// Comment text (trimmed; blank text is ignored)
		#[arg(allow_hyphen_values = true)]
		text: String,
	},

	/// Discard the wish and return to the upload prompt
	Reset,

	/// Generate a (pretend) share link
	Share,

	/// Read NDJSON requests from stdin and answer each on stdout
	Batch,
}
