//! Wish lifecycle: load, validate, expire, mutate, persist.
//!
//! The session owns exactly one slot. Every successful mutation of an active
//! wish is written straight through; every transition to [`SessionState::Empty`]
//! or [`SessionState::Expired`] deletes the slot.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::time::Duration;

use tracing::{debug, info, warn};
use wish_protocol::{StoredComment, StoredWish};

use crate::caption::CaptionSource;
use crate::clock::Clock;
use crate::error::Result;
use crate::photo::PhotoData;
use crate::record::{Comment, WishRecord};
use crate::share::fabricate_share_link;
use crate::store::SlotStore;


/// How long a wish stays visible after upload.
pub const EXPIRATION_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;

/// Toast text shown when a like lands exactly on the goal.
pub const GOAL_REACHED_MESSAGE: &str = "Congratulations! Your wish reached its goal! 🎉";

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
	#[default]
	Empty,
	Active(WishRecord),
	Expired,
}

impl SessionState {
	pub fn name(&self) -> &'static str {
		match self {
			SessionState::Empty => "empty",
			SessionState::Active(_) => "active",
			SessionState::Expired => "expired",
		}
	}
}

/// When expiry is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryPolicy {
	/// Only [`Session::load`] checks the window. A long-running process
	/// keeps showing the wish past 24h until it restarts.
	#[default]
	OnLoad,
	/// Every operation re-checks the window first.
	Continuous,
}

/// Result of a [`Session::like`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
	/// Nothing active, or the goal was already met.
	Ignored,
	Liked { likes: u32 },
	/// This like made the count equal to the goal.
	GoalReached { likes: u32 },
}

/// One-time notifications for the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
	GoalReached { goal: u32 },
	CommentAdded { id: u64 },
}

impl SessionEvent {
	/// Toast text for events that show one.
	pub fn message(&self) -> Option<&'static str> {
		match self {
			SessionEvent::GoalReached { .. } => Some(GOAL_REACHED_MESSAGE),
			SessionEvent::CommentAdded { .. } => None,
		}
	}
}

/// Owner of the single wish and its persisted slot.
pub struct Session {
	store: Box<dyn SlotStore>,
	clock: Box<dyn Clock>,
	captions: Box<dyn CaptionSource>,
	policy: ExpiryPolicy,
	state: SessionState,
	events: VecDeque<SessionEvent>,
}

impl Session {
	/// Restores the session from the slot.
	///
	/// An empty slot yields [`SessionState::Empty`]. Contents that fail to
	/// parse or break a record invariant are discarded: the slot is cleared
	/// and the session starts empty. A wish older than
	/// [`EXPIRATION_WINDOW_MS`] is purged and the session starts
	/// [`SessionState::Expired`]. Only store I/O failures are returned.
	pub fn load(store: impl SlotStore + 'static, clock: impl Clock + 'static, captions: impl CaptionSource + 'static) -> Result<Self> {
		let mut session = Self {
			store: Box::new(store),
			clock: Box::new(clock),
			captions: Box::new(captions),
			policy: ExpiryPolicy::default(),
			state: SessionState::Empty,
			events: VecDeque::new(),
		};
		session.state = session.restore()?;
		Ok(session)
	}

	pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
		self.policy = policy;
		self
	}

	fn restore(&self) -> Result<SessionState> {
		let Some(raw) = self.store.read_slot()? else {
			debug!(target = "wish.session", "no persisted wish");
			return Ok(SessionState::Empty);
		};

		let stored = match StoredWish::from_json(&raw) {
			Ok(stored) => stored,
			Err(err) => {
				warn!(target = "wish.session", error = %err, "discarding unparseable slot");
				self.clear_persisted()?;
				return Ok(SessionState::Empty);
			}
		};

		let record = match WishRecord::try_from(stored) {
			Ok(record) => record,
			Err(violation) => {
				warn!(target = "wish.session", %violation, "discarding invalid slot");
				self.clear_persisted()?;
				return Ok(SessionState::Empty);
			}
		};

		if self.is_past_window(&record) {
			info!(target = "wish.session", created_at = record.created_at, "wish expired");
			self.clear_persisted()?;
			return Ok(SessionState::Expired);
		}

		debug!(target = "wish.session", likes = record.like_count, comments = record.comments.len(), "wish restored");
		Ok(SessionState::Active(record))
	}

	pub fn state(&self) -> &SessionState {
		&self.state
	}

	pub fn record(&self) -> Option<&WishRecord> {
		match &self.state {
			SessionState::Active(record) => Some(record),
			_ => None,
		}
	}

	pub fn is_expired(&self) -> bool {
		matches!(self.state, SessionState::Expired)
	}

	pub fn expiry_policy(&self) -> ExpiryPolicy {
		self.policy
	}

	/// Time left before the active wish expires.
	pub fn time_remaining(&self) -> Option<Duration> {
		let record = self.record()?;
		let elapsed = self.clock.now_ms().saturating_sub(record.created_at);
		Some(Duration::from_millis(EXPIRATION_WINDOW_MS.saturating_sub(elapsed)))
	}

	/// Creates a new wish, replacing whatever was there before.
	pub fn upload(&mut self, photo: PhotoData, like_goal: Option<NonZeroU32>) -> Result<()> {
		let record = WishRecord::new(photo, self.captions.pick(), self.clock.now_ms(), like_goal);
		info!(
			target = "wish.session",
			caption = %record.caption,
			like_goal = record.like_goal.map(NonZeroU32::get),
			photo_bytes = record.photo.encoded_len(),
			"wish uploaded"
		);
		self.write(&StoredWish::from(&record))?;
		self.state = SessionState::Active(record);
		self.events.clear();
		Ok(())
	}

	/// Adds one like unless the goal has been met.
	///
	/// The slot is written before the in-memory record changes, so a failed
	/// write leaves both untouched.
	pub fn like(&mut self) -> Result<LikeOutcome> {
		self.enforce_policy()?;
		let Some(record) = self.record() else {
			return Ok(LikeOutcome::Ignored);
		};
		if record.goal_reached() {
			return Ok(LikeOutcome::Ignored);
		}
		let Some(likes) = record.like_count.checked_add(1) else {
			warn!(target = "wish.session", likes = record.like_count, "like counter saturated");
			return Ok(LikeOutcome::Ignored);
		};
		let reached = record.like_goal.filter(|goal| goal.get() == likes);

		let mut stored = StoredWish::from(record);
		stored.likes = likes;
		self.write(&stored)?;
		if let SessionState::Active(record) = &mut self.state {
			record.like_count = likes;
		}

		match reached {
			Some(goal) => {
				info!(target = "wish.session", likes, "like goal reached");
				self.events.push_back(SessionEvent::GoalReached { goal: goal.get() });
				Ok(LikeOutcome::GoalReached { likes })
			}
			None => Ok(LikeOutcome::Liked { likes }),
		}
	}

	/// Appends a trimmed comment. Blank text is ignored, as is a comment
	/// for which no unused id remains.
	pub fn add_comment(&mut self, text: &str) -> Result<Option<&Comment>> {
		self.enforce_policy()?;
		let text = text.trim();
		let now = self.clock.now_ms();
		let Some(record) = self.record() else {
			return Ok(None);
		};
		if text.is_empty() {
			return Ok(None);
		}
		let Some(id) = record.next_comment_id(now) else {
			warn!(target = "wish.session", "comment ids exhausted");
			return Ok(None);
		};

		let comment = Comment { id, text: text.to_string() };
		let mut stored = StoredWish::from(record);
		stored.comments.push(StoredComment {
			id,
			text: comment.text.clone(),
		});
		self.write(&stored)?;
		if let SessionState::Active(record) = &mut self.state {
			record.comments.push(comment);
		}
		self.events.push_back(SessionEvent::CommentAdded { id });
		debug!(target = "wish.session", id, "comment added");

		Ok(self.record().and_then(|record| record.comments.last()))
	}

	/// Drops any wish and returns to the upload prompt.
	pub fn reset(&mut self) -> Result<()> {
		self.clear_persisted()?;
		self.state = SessionState::Empty;
		self.events.clear();
		debug!(target = "wish.session", "session reset");
		Ok(())
	}

	/// Re-checks the expiration window against the clock.
	///
	/// Returns `true` if the active wish expired on this call.
	pub fn refresh_expiry(&mut self) -> Result<bool> {
		let expired = self.record().is_some_and(|record| self.is_past_window(record));
		if expired {
			info!(target = "wish.session", "wish expired while running");
			self.clear_persisted()?;
			self.state = SessionState::Expired;
			self.events.clear();
		}
		Ok(expired)
	}

	/// Fabricates a throwaway share link for the active wish.
	///
	/// The link is never resolvable; it only looks like one.
	pub fn share_link(&mut self, origin: &str) -> Result<Option<String>> {
		self.enforce_policy()?;
		Ok(self.record().map(|_| fabricate_share_link(origin, &mut rand::rng())))
	}

	/// Takes all pending notifications.
	pub fn drain_events(&mut self) -> Vec<SessionEvent> {
		self.events.drain(..).collect()
	}

	fn enforce_policy(&mut self) -> Result<()> {
		if self.policy == ExpiryPolicy::Continuous {
			self.refresh_expiry()?;
		}
		Ok(())
	}

	fn is_past_window(&self, record: &WishRecord) -> bool {
		self.clock.now_ms().saturating_sub(record.created_at) > EXPIRATION_WINDOW_MS
	}

	fn write(&self, stored: &StoredWish) -> Result<()> {
		self.store.write_slot(&stored.to_json()?)
	}

	fn clear_persisted(&self) -> Result<()> {
		self.store.clear_slot()?;
		Ok(())
	}
}
