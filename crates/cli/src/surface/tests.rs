use std::time::Duration;

use tempfile::TempDir;
use wish::{EXPIRATION_WINDOW_MS, FixedCaption, GOAL_REACHED_MESSAGE, ManualClock, MemorySlot};

use super::*;

const NOW: u64 = 1_760_000_000_000;

fn surface_with(slot: &MemorySlot, clock: &ManualClock, config: WishConfig) -> WishSurface {
	let session = Session::load(slot.clone(), clock.clone(), FixedCaption("💖 Sending good vibes your way.".into()))
		.unwrap()
		.with_expiry_policy(config.expiry_policy());
	WishSurface::from_session(session, config)
}

fn png(dir: &TempDir) -> PathBuf {
	let path = dir.path().join("wish.png");
	std::fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();
	path
}

#[tokio::test(start_paused = true)]
async fn goal_toast_shows_then_clears() {
	let tmp = TempDir::new().unwrap();
	let slot = MemorySlot::new();
	let mut surface = surface_with(&slot, &ManualClock::new(NOW), WishConfig::default());

	surface.upload(&png(&tmp), NonZeroU32::new(1)).await.unwrap();
	let liked = surface.like().unwrap();
	assert_eq!(liked["outcome"], "goalReached");
	assert_eq!(surface.notification().as_deref(), Some(GOAL_REACHED_MESSAGE));

	tokio::time::sleep(Duration::from_millis(3001)).await;
	assert_eq!(surface.notification(), None);

	let again = surface.like().unwrap();
	assert_eq!(again["outcome"], "ignored");
	assert_eq!(again["likes"], 1);
	assert_eq!(surface.notification(), None);
}

#[tokio::test(start_paused = true)]
async fn status_renders_each_state() {
	let tmp = TempDir::new().unwrap();
	let slot = MemorySlot::new();
	let clock = ManualClock::new(NOW);
	let mut surface = surface_with(&slot, &clock, WishConfig::default());

	let empty = surface.status(false).unwrap();
	assert_eq!(empty["state"], "empty");
	assert_eq!(empty["defaultGoal"], 50);

	surface.upload(&png(&tmp), None).await.unwrap();
	surface.comment("  lovely ").unwrap();
	let active = surface.status(false).unwrap();
	assert_eq!(active["state"], "active");
	assert_eq!(active["photo"]["mime"], "image/png");
	assert!(active["likeGoal"].is_null());
	assert_eq!(active["comments"][0]["text"], "lovely");
	assert_eq!(active["expiresInMs"], EXPIRATION_WINDOW_MS);
	assert_eq!(active["newComment"], NOW);

	let with_photo = surface.status(true).unwrap();
	assert!(with_photo["photo"].as_str().unwrap().starts_with("data:image/png;base64,"));

	drop(surface);
	clock.advance(EXPIRATION_WINDOW_MS + 1);
	let mut restarted = surface_with(&slot, &clock, WishConfig::default());
	let expired = restarted.status(false).unwrap();
	assert_eq!(expired["state"], "expired");
	assert_eq!(expired["title"], "The Day is Done");

	let reset = restarted.reset().unwrap();
	assert_eq!(reset["previous"], "expired");
	assert_eq!(reset["state"], "empty");
}

#[tokio::test(start_paused = true)]
async fn continuous_check_expires_running_surface() {
	let tmp = TempDir::new().unwrap();
	let slot = MemorySlot::new();
	let clock = ManualClock::new(NOW);
	let config = WishConfig {
		expiry_check: crate::config::ExpiryCheck::Continuous,
		..Default::default()
	};
	let mut surface = surface_with(&slot, &clock, config);

	surface.upload(&png(&tmp), None).await.unwrap();
	clock.advance(EXPIRATION_WINDOW_MS + 1);
	assert_eq!(surface.status(false).unwrap()["state"], "expired");
	assert!(slot.contents().is_none());
}

#[tokio::test(start_paused = true)]
async fn share_marks_copied_briefly() {
	let tmp = TempDir::new().unwrap();
	let slot = MemorySlot::new();
	let mut surface = surface_with(&slot, &ManualClock::new(NOW), WishConfig::default());

	let nothing = surface.share().unwrap();
	assert!(nothing["shareLink"].is_null());
	assert_eq!(nothing["copied"], false);

	surface.upload(&png(&tmp), None).await.unwrap();
	let shared = surface.share().unwrap();
	assert!(shared["shareLink"].as_str().unwrap().starts_with("http://localhost:5173/#shared/"));
	assert_eq!(shared["copied"], true);

	tokio::time::sleep(Duration::from_millis(2001)).await;
	let status = surface.status(false).unwrap();
	assert_eq!(status["copied"], false);
	assert_eq!(status["shareLink"], shared["shareLink"]);
}

#[tokio::test]
async fn blank_comment_is_not_added() {
	let tmp = TempDir::new().unwrap();
	let slot = MemorySlot::new();
	let mut surface = surface_with(&slot, &ManualClock::new(NOW), WishConfig::default());
	surface.upload(&png(&tmp), None).await.unwrap();

	let result = surface.comment("   ").unwrap();
	assert_eq!(result["added"], false);
	assert!(result["comment"].is_null());
	assert_eq!(result["commentCount"], 0);
}
