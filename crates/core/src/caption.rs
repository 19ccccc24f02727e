//! Decorative caption pool.

use rand::seq::IndexedRandom;

/// Built-in party/wish captions.
pub const WISH_CAPTIONS: [&str; 7] = [
	"✨ Making a wish come true!",
	"🎉 A moment of pure joy!",
	"💖 Sending good vibes your way.",
	"🥳 Celebrating this wonderful memory.",
	"🎁 A gift of a moment, captured for a day.",
	"🌟 Shine bright and make your wish!",
	"🎈 Hope this brings a smile to your face.",
];

/// Supplies the caption for a newly uploaded wish.
pub trait CaptionSource {
	fn pick(&mut self) -> String;
}

/// Uniform random pick from [`WISH_CAPTIONS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCaptions;

impl CaptionSource for RandomCaptions {
	fn pick(&mut self) -> String {
		WISH_CAPTIONS.choose(&mut rand::rng()).copied().unwrap_or(WISH_CAPTIONS[0]).to_string()
	}
}

/// Always returns the same caption.
#[derive(Debug, Clone)]
pub struct FixedCaption(pub String);

impl CaptionSource for FixedCaption {
	fn pick(&mut self) -> String {
		self.0.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn random_caption_comes_from_pool() {
		let mut captions = RandomCaptions;
		for _ in 0..32 {
			let caption = captions.pick();
			assert!(WISH_CAPTIONS.contains(&caption.as_str()), "unexpected caption {caption:?}");
		}
	}
}
