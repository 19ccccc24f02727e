use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the wish session and its collaborators.
///
/// Corrupt slot contents are never reported here; [`Session::load`](crate::Session::load)
/// discards them. Only real storage and input failures reach the caller.
#[derive(Debug, Error)]
pub enum WishError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("{} is not a supported image", path.display())]
	NotAnImage { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, WishError>;
