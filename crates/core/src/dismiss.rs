//! Self-clearing flags for transient display state.
//!
//! A [`DismissSlot`] holds a value that disappears after a delay: the goal
//! toast, the comment pulse, the "link copied" marker. Showing a new value
//! re-arms the slot; the older timer still fires but finds a newer
//! generation and leaves the value alone.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug)]
struct Inner<T> {
	value: Option<T>,
	generation: u64,
}

/// Value that clears itself after a delay.
#[derive(Debug)]
pub struct DismissSlot<T> {
	inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for DismissSlot<T> {
	fn clone(&self) -> Self {
		Self { inner: Arc::clone(&self.inner) }
	}
}

impl<T> Default for DismissSlot<T> {
	fn default() -> Self {
		Self {
			inner: Arc::new(Mutex::new(Inner { value: None, generation: 0 })),
		}
	}
}

impl<T: Clone + Send + 'static> DismissSlot<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows `value` and schedules it to clear after `after`.
	///
	/// Must be called from within a tokio runtime.
	pub fn show(&self, value: T, after: Duration) -> JoinHandle<()> {
		let generation = {
			let mut inner = self.inner.lock();
			inner.generation += 1;
			inner.value = Some(value);
			inner.generation
		};

		let inner = Arc::clone(&self.inner);
		tokio::spawn(async move {
			tokio::time::sleep(after).await;
			let mut inner = inner.lock();
			if inner.generation == generation {
				inner.value = None;
			}
		})
	}

	pub fn current(&self) -> Option<T> {
		self.inner.lock().value.clone()
	}

	pub fn is_showing(&self) -> bool {
		self.inner.lock().value.is_some()
	}

	/// Clears immediately. Pending timers become no-ops.
	pub fn dismiss(&self) {
		let mut inner = self.inner.lock();
		inner.generation += 1;
		inner.value = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test(start_paused = true)]
	async fn clears_after_delay() {
		let toast = DismissSlot::new();
		toast.show("goal!", Duration::from_millis(3000));
		assert_eq!(toast.current(), Some("goal!"));

		tokio::time::sleep(Duration::from_millis(2999)).await;
		assert!(toast.is_showing());

		tokio::time::sleep(Duration::from_millis(2)).await;
		assert_eq!(toast.current(), None);
	}

	#[tokio::test(start_paused = true)]
	async fn newer_show_survives_older_timer() {
		let toast = DismissSlot::new();
		toast.show(1, Duration::from_millis(3000));
		tokio::time::sleep(Duration::from_millis(1000)).await;
		toast.show(2, Duration::from_millis(3000));

		tokio::time::sleep(Duration::from_millis(2500)).await;
		assert_eq!(toast.current(), Some(2));

		tokio::time::sleep(Duration::from_millis(1000)).await;
		assert_eq!(toast.current(), None);
	}

	#[tokio::test(start_paused = true)]
	async fn dismiss_disarms_pending_timer() {
		let pulse = DismissSlot::new();
		let timer = pulse.show(true, Duration::from_millis(500));
		pulse.dismiss();
		assert!(!pulse.is_showing());

		pulse.show(true, Duration::from_millis(5000));
		timer.await.unwrap();
		assert!(pulse.is_showing());
	}
}
