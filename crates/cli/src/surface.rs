//! Capture and display surface over a wish [`Session`].
//!
//! The surface forwards user actions to the session, turns session events
//! into transient display state (goal toast, comment pulse, copied marker)
//! and renders everything as JSON payloads for the output envelope.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, info};
use wish::{DismissSlot, ExpiryPolicy, FileSlot, LikeOutcome, RandomCaptions, Session, SessionEvent, SessionState, SystemClock, WishRecord, read_photo};

use crate::config::WishConfig;
use crate::error::Result;

const EXPIRED_TITLE: &str = "The Day is Done";
const EXPIRED_MESSAGE: &str = "This wish was here for the day, but now it's time for a new sunrise.";
const UPLOAD_PROMPT: &str = "Make a wish for the day!";
const UPLOAD_HINT: &str = "Your wish disappears automatically after 24 hours.";

/// Owns the session plus the display-only state around it.
pub struct WishSurface {
	session: Session,
	config: WishConfig,
	store_path: Option<PathBuf>,
	toast: DismissSlot<String>,
	pulse: DismissSlot<u64>,
	copied: DismissSlot<bool>,
	share_link: Option<String>,
}

impl WishSurface {
	/// Opens the file-backed session selected by `config` and `store_override`.
	pub fn open(config: WishConfig, store_override: Option<&Path>) -> Result<Self> {
		let path = config.resolve_store_path(store_override);
		debug!(target = "wish.cli", path = %path.display(), "opening wish slot");
		let session = Session::load(FileSlot::new(&path), SystemClock, RandomCaptions)?.with_expiry_policy(config.expiry_policy());
		let mut surface = Self::from_session(session, config);
		surface.store_path = Some(path);
		Ok(surface)
	}

	pub fn from_session(session: Session, config: WishConfig) -> Self {
		Self {
			session,
			config,
			store_path: None,
			toast: DismissSlot::new(),
			pulse: DismissSlot::new(),
			copied: DismissSlot::new(),
			share_link: None,
		}
	}

	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn config(&self) -> &WishConfig {
		&self.config
	}

	/// Toast text currently showing, if any.
	pub fn notification(&self) -> Option<String> {
		self.toast.current()
	}

	pub fn status(&mut self, include_photo: bool) -> Result<Value> {
		if self.session.expiry_policy() == ExpiryPolicy::Continuous {
			self.session.refresh_expiry()?;
		}
		Ok(self.render(include_photo))
	}

	/// Reads `file` and makes it the new wish.
	pub async fn upload(&mut self, file: &Path, like_goal: Option<NonZeroU32>) -> Result<Value> {
		let photo = read_photo(file).await?;
		self.session.upload(photo, like_goal)?;
		self.share_link = None;
		self.toast.dismiss();
		self.pulse.dismiss();
		self.copied.dismiss();
		info!(target = "wish.cli", file = %file.display(), "wish created");
		Ok(self.render(false))
	}

	pub fn like(&mut self) -> Result<Value> {
		let outcome = self.session.like()?;
		self.absorb_events();
		let (name, likes) = match outcome {
			LikeOutcome::Ignored => ("ignored", self.session.record().map(WishRecord::like_count)),
			LikeOutcome::Liked { likes } => ("liked", Some(likes)),
			LikeOutcome::GoalReached { likes } => ("goalReached", Some(likes)),
		};
		Ok(json!({
			"outcome": name,
			"state": self.session.state().name(),
			"likes": likes,
			"likeGoal": self.session.record().and_then(|r| r.like_goal()).map(NonZeroU32::get),
		}))
	}

	pub fn comment(&mut self, text: &str) -> Result<Value> {
		let added = self.session.add_comment(text)?.cloned();
		self.absorb_events();
		Ok(json!({
			"added": added.is_some(),
			"comment": added,
			"state": self.session.state().name(),
			"commentCount": self.session.record().map(|r| r.comments().len()),
		}))
	}

	pub fn reset(&mut self) -> Result<Value> {
		let was = self.session.state().name();
		self.session.reset()?;
		self.share_link = None;
		self.toast.dismiss();
		self.pulse.dismiss();
		self.copied.dismiss();
		Ok(json!({
			"previous": was,
			"state": self.session.state().name(),
		}))
	}

	/// Generates a fake share link and marks it as copied for a moment.
	pub fn share(&mut self) -> Result<Value> {
		let link = self.session.share_link(&self.config.share_origin)?;
		if link.is_some() {
			self.copied.show(true, self.config.copied_duration());
			self.share_link.clone_from(&link);
		}
		Ok(json!({
			"state": self.session.state().name(),
			"shareLink": link,
			"copied": self.copied.is_showing(),
		}))
	}

	fn absorb_events(&mut self) {
		for event in self.session.drain_events() {
			match &event {
				SessionEvent::GoalReached { .. } => {
					if let Some(message) = event.message() {
						self.toast.show(message.to_string(), self.config.toast_duration());
					}
				}
				SessionEvent::CommentAdded { id } => {
					self.pulse.show(*id, self.config.pulse_duration());
				}
			}
		}
	}

	fn render(&self, include_photo: bool) -> Value {
		match self.session.state() {
			SessionState::Empty => json!({
				"state": "empty",
				"prompt": UPLOAD_PROMPT,
				"hint": UPLOAD_HINT,
				"defaultGoal": self.config.default_goal.get(),
				"store": self.store_path,
			}),
			SessionState::Expired => json!({
				"state": "expired",
				"title": EXPIRED_TITLE,
				"message": EXPIRED_MESSAGE,
			}),
			SessionState::Active(record) => {
				let photo = if include_photo {
					json!(record.photo())
				} else {
					json!({
						"mime": record.photo().mime(),
						"encodedBytes": record.photo().encoded_len(),
					})
				};
				json!({
					"state": "active",
					"photo": photo,
					"caption": record.caption(),
					"createdAt": record.created_at(),
					"likes": record.like_count(),
					"likeGoal": record.like_goal().map(NonZeroU32::get),
					"goalReached": record.goal_reached(),
					"comments": record.comments(),
					"expiresInMs": self.session.time_remaining().map(|d| d.as_millis() as u64),
					"shareLink": self.share_link,
					"copied": self.copied.is_showing(),
					"newComment": self.pulse.current(),
				})
			}
		}
	}
}

#[cfg(test)]
mod tests;
