//! Fabricated share links.

use rand::Rng;

const SHARE_ID_LEN: usize = 8;

/// Builds `"{origin}/#shared/{id}"` with a random lowercase base36 id.
///
/// Nothing serves these links; they exist to be copied and shown.
pub fn fabricate_share_link(origin: &str, rng: &mut impl Rng) -> String {
	let id: String = (0..SHARE_ID_LEN)
		.map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
		.collect();
	format!("{}/#shared/{id}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_has_origin_and_base36_id() {
		let link = fabricate_share_link("http://localhost:5173/", &mut rand::rng());
		let id = link.strip_prefix("http://localhost:5173/#shared/").expect("origin prefix");
		assert_eq!(id.len(), SHARE_ID_LEN);
		assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
	}

	#[test]
	fn links_differ_between_calls() {
		let mut rng = rand::rng();
		let a = fabricate_share_link("https://wish.example", &mut rng);
		let b = fabricate_share_link("https://wish.example", &mut rng);
		assert_ne!(a, b);
	}
}
