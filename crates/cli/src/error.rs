use std::path::PathBuf;

use thiserror::Error;
use wish::WishError;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Wish(#[from] WishError),

	#[error("failed to read config {}: {source}", path.display())]
	Config {
		path: PathBuf,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	#[error("{0}")]
	InvalidInput(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Wish(WishError::NotAnImage { .. }) | CliError::InvalidInput(_) | CliError::Json(_) => ErrorCode::InvalidInput,
			CliError::Wish(WishError::Io(_)) | CliError::Io(_) => ErrorCode::IoError,
			CliError::Config { .. } => ErrorCode::ConfigError,
			CliError::Wish(WishError::Json(_)) => ErrorCode::InternalError,
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;
