//! `data:` URL encoding for photo payloads.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes raw bytes as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
	format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Splits a base64 `data:` URL into its MIME type and payload.
///
/// Returns `None` for anything that is not of the form
/// `data:<mime>;base64,<payload>`.
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
	let rest = url.strip_prefix("data:")?;
	let (header, payload) = rest.split_once(',')?;
	let mime = header.strip_suffix(";base64")?;
	if mime.is_empty() {
		return None;
	}
	Some((mime, payload))
}
