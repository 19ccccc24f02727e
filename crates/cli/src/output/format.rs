use clap::ValueEnum;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// TOON (default, compact)
	#[default]
	Toon,
	/// Pretty JSON
	Json,
	/// One JSON object per line
	Ndjson,
	/// Plain text: toast, then the payload
	Text,
}
