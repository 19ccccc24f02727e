//! The wish record and its mapping to the persisted slot.

use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;
use wish_protocol::{StoredComment, StoredWish};

use crate::photo::PhotoData;

/// A single appended comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
	pub id: u64,
	pub text: String,
}

/// The one wish a session can hold.
///
/// `photo`, `caption`, `created_at` and `like_goal` are fixed at upload.
/// Only the session mutates `like_count` and `comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishRecord {
	pub(crate) photo: PhotoData,
	pub(crate) caption: String,
	pub(crate) created_at: u64,
	pub(crate) like_goal: Option<NonZeroU32>,
	pub(crate) like_count: u32,
	pub(crate) comments: Vec<Comment>,
}

impl WishRecord {
	pub(crate) fn new(photo: PhotoData, caption: String, created_at: u64, like_goal: Option<NonZeroU32>) -> Self {
		Self {
			photo,
			caption,
			created_at,
			like_goal,
			like_count: 0,
			comments: Vec::new(),
		}
	}

	pub fn photo(&self) -> &PhotoData {
		&self.photo
	}

	pub fn caption(&self) -> &str {
		&self.caption
	}

	pub fn created_at(&self) -> u64 {
		self.created_at
	}

	pub fn like_goal(&self) -> Option<NonZeroU32> {
		self.like_goal
	}

	pub fn like_count(&self) -> u32 {
		self.like_count
	}

	pub fn comments(&self) -> &[Comment] {
		&self.comments
	}

	/// True once a goal is set and the count has reached it.
	pub fn goal_reached(&self) -> bool {
		self.like_goal.is_some_and(|goal| self.like_count >= goal.get())
	}

	/// Next comment id: the current time, bumped past the last id so ids
	/// stay unique within the record. `None` once the last id is `u64::MAX`.
	pub(crate) fn next_comment_id(&self, now_ms: u64) -> Option<u64> {
		match self.comments.last() {
			Some(last) if last.id >= now_ms => last.id.checked_add(1),
			_ => Some(now_ms),
		}
	}
}

/// Why a parsed slot could not be accepted as a wish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotViolation {
	EmptyPhoto,
	EmptyCaption,
	ZeroGoal,
	LikesAboveGoal { likes: u32, goal: u32 },
	BlankComment { id: u64 },
}

impl fmt::Display for SlotViolation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SlotViolation::EmptyPhoto => write!(f, "photo payload is empty"),
			SlotViolation::EmptyCaption => write!(f, "caption is empty"),
			SlotViolation::ZeroGoal => write!(f, "like goal is zero"),
			SlotViolation::LikesAboveGoal { likes, goal } => write!(f, "{likes} likes exceeds goal of {goal}"),
			SlotViolation::BlankComment { id } => write!(f, "comment {id} has blank text"),
		}
	}
}

impl TryFrom<StoredWish> for WishRecord {
	type Error = SlotViolation;

	fn try_from(stored: StoredWish) -> Result<Self, Self::Error> {
		let photo = PhotoData::from_encoded(stored.photo_data_url).ok_or(SlotViolation::EmptyPhoto)?;
		if stored.caption.is_empty() {
			return Err(SlotViolation::EmptyCaption);
		}
		let like_goal = match stored.like_limit {
			Some(limit) => Some(NonZeroU32::new(limit).ok_or(SlotViolation::ZeroGoal)?),
			None => None,
		};
		if let Some(goal) = like_goal {
			if stored.likes > goal.get() {
				return Err(SlotViolation::LikesAboveGoal {
					likes: stored.likes,
					goal: goal.get(),
				});
			}
		}
		if let Some(blank) = stored.comments.iter().find(|c| c.text.trim().is_empty()) {
			return Err(SlotViolation::BlankComment { id: blank.id });
		}

		Ok(Self {
			photo,
			caption: stored.caption,
			created_at: stored.timestamp,
			like_goal,
			like_count: stored.likes,
			comments: stored.comments.into_iter().map(|c| Comment { id: c.id, text: c.text }).collect(),
		})
	}
}

impl From<&WishRecord> for StoredWish {
	fn from(record: &WishRecord) -> Self {
		StoredWish {
			photo_data_url: record.photo.as_str().to_string(),
			likes: record.like_count,
			comments: record
				.comments
				.iter()
				.map(|c| StoredComment {
					id: c.id,
					text: c.text.clone(),
				})
				.collect(),
			timestamp: record.created_at,
			caption: record.caption.clone(),
			like_limit: record.like_goal.map(NonZeroU32::get),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn stored() -> StoredWish {
		StoredWish {
			photo_data_url: "data:image/png;base64,AA==".to_string(),
			likes: 2,
			comments: vec![StoredComment { id: 10, text: "hi".to_string() }],
			timestamp: 1_000,
			caption: "🎉 A moment of pure joy!".to_string(),
			like_limit: Some(5),
		}
	}

	#[test]
	fn stored_wish_converts_both_ways() {
		let record = WishRecord::try_from(stored()).unwrap();
		assert_eq!(record.like_count(), 2);
		assert_eq!(record.like_goal().map(NonZeroU32::get), Some(5));
		assert_eq!(StoredWish::from(&record), stored());
	}

	#[test]
	fn rejects_likes_above_goal() {
		let mut wish = stored();
		wish.likes = 6;
		assert_eq!(WishRecord::try_from(wish), Err(SlotViolation::LikesAboveGoal { likes: 6, goal: 5 }));
	}

	#[test]
	fn rejects_zero_goal_and_blank_comments() {
		let mut wish = stored();
		wish.like_limit = Some(0);
		assert_eq!(WishRecord::try_from(wish), Err(SlotViolation::ZeroGoal));

		let mut wish = stored();
		wish.comments.push(StoredComment { id: 11, text: "  \t".to_string() });
		assert_eq!(WishRecord::try_from(wish), Err(SlotViolation::BlankComment { id: 11 }));
	}

	#[test]
	fn unlimited_goal_accepts_any_count() {
		let mut wish = stored();
		wish.like_limit = None;
		wish.likes = 10_000;
		let record = WishRecord::try_from(wish).unwrap();
		assert!(!record.goal_reached());
	}

	#[test]
	fn comment_ids_stay_unique_within_a_tick() {
		let mut record = WishRecord::try_from(stored()).unwrap();
		assert_eq!(record.next_comment_id(50), Some(50));
		assert_eq!(record.next_comment_id(10), Some(11));
		record.comments.push(Comment { id: 11, text: "b".into() });
		assert_eq!(record.next_comment_id(11), Some(12));
	}

	#[test]
	fn comment_id_after_max_is_unavailable() {
		let mut wish = stored();
		wish.comments[0].id = u64::MAX;
		let record = WishRecord::try_from(wish).unwrap();
		assert_eq!(record.next_comment_id(1_000), None);
	}
}
