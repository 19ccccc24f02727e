//! Session manager for a single ephemeral photo wish.
//!
//! A wish is one photo with a caption, a like counter (optionally capped by a
//! goal) and a list of comments. It lives in a single persisted slot and
//! expires 24 hours after upload.
//!
//! [`Session`] owns the lifecycle: [`Session::load`] restores the slot on
//! startup and decides whether the wish is still visible, and the mutation
//! methods write every change straight through to the slot.

pub mod caption;
pub mod clock;
pub mod dismiss;
pub mod error;
pub mod photo;
pub mod record;
pub mod session;
pub mod share;
pub mod store;

pub use caption::{CaptionSource, FixedCaption, RandomCaptions, WISH_CAPTIONS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use dismiss::DismissSlot;
pub use error::{Result, WishError};
pub use photo::{PhotoData, read_photo};
pub use record::{Comment, WishRecord};
pub use session::{EXPIRATION_WINDOW_MS, ExpiryPolicy, GOAL_REACHED_MESSAGE, LikeOutcome, Session, SessionEvent, SessionState};
pub use store::{FileSlot, MemorySlot, SlotStore};
