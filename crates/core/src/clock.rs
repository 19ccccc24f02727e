//! Millisecond wall clock used for creation timestamps and expiry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in milliseconds since the Unix epoch.
pub trait Clock {
	fn now_ms(&self) -> u64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_ms(&self) -> u64 {
		SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
	}
}

/// Settable clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
	pub fn new(now_ms: u64) -> Self {
		Self(Arc::new(AtomicU64::new(now_ms)))
	}

	pub fn set(&self, now_ms: u64) {
		self.0.store(now_ms, Ordering::SeqCst);
	}

	pub fn advance(&self, ms: u64) {
		self.0.fetch_add(ms, Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now_ms(&self) -> u64 {
		self.0.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn manual_clock_clones_share_time() {
		let clock = ManualClock::new(1_000);
		let other = clock.clone();
		clock.advance(500);
		assert_eq!(other.now_ms(), 1_500);
		other.set(7);
		assert_eq!(clock.now_ms(), 7);
	}

	#[test]
	fn system_clock_is_past_2020() {
		assert!(SystemClock.now_ms() > 1_577_836_800_000);
	}
}
