//! Persisted slot schema.

use serde::{Deserialize, Serialize};

/// A comment as stored in the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredComment {
	pub id: u64,
	pub text: String,
}

/// Full contents of the persisted slot.
///
/// `timestamp` is the creation time in milliseconds since the Unix epoch.
/// `like_limit` serializes as `null` when the wish has no goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWish {
	pub photo_data_url: String,
	pub likes: u32,
	pub comments: Vec<StoredComment>,
	pub timestamp: u64,
	pub caption: String,
	pub like_limit: Option<u32>,
}

impl StoredWish {
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}
}
