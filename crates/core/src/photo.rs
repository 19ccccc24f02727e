//! Photo capture: reading an image file into an encoded data blob.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use wish_protocol::{encode_data_url, split_data_url};

use crate::error::{Result, WishError};

/// Encoded image payload, stored as a base64 `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhotoData(String);

impl PhotoData {
	pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
		Self(encode_data_url(mime, bytes))
	}

	/// Wraps an already-encoded payload read back from the slot.
	///
	/// Returns `None` for an empty payload.
	pub fn from_encoded(encoded: String) -> Option<Self> {
		if encoded.is_empty() { None } else { Some(Self(encoded)) }
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// MIME type of a well-formed data URL.
	pub fn mime(&self) -> Option<&str> {
		split_data_url(&self.0).map(|(mime, _)| mime)
	}

	/// Length of the encoded payload in bytes.
	pub fn encoded_len(&self) -> usize {
		self.0.len()
	}
}

/// Reads an image file and encodes it as [`PhotoData`].
///
/// The MIME type is sniffed from the file's magic bytes, falling back to its
/// extension. Files that are neither are rejected with [`WishError::NotAnImage`].
pub async fn read_photo(path: impl AsRef<Path>) -> Result<PhotoData> {
	let path = path.as_ref();
	let bytes = tokio::fs::read(path).await?;
	let Some(mime) = sniff_mime(&bytes).or_else(|| mime_from_extension(path)) else {
		return Err(WishError::NotAnImage { path: path.to_path_buf() });
	};
	debug!(target = "wish.photo", path = %path.display(), mime, size = bytes.len(), "photo read");
	Ok(PhotoData::from_bytes(mime, &bytes))
}

fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
	if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
		Some("image/png")
	} else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
		Some("image/jpeg")
	} else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
		Some("image/gif")
	} else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
		Some("image/webp")
	} else {
		None
	}
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
	let ext = path.extension()?.to_str()?.to_ascii_lowercase();
	match ext.as_str() {
		"png" => Some("image/png"),
		"jpg" | "jpeg" => Some("image/jpeg"),
		"gif" => Some("image/gif"),
		"webp" => Some("image/webp"),
		"svg" => Some("image/svg+xml"),
		"bmp" => Some("image/bmp"),
		"avif" => Some("image/avif"),
		_ => None,
	}
}
