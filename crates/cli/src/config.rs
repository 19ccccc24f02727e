//! User configuration loaded from `<config dir>/wish/config.json`.
//!
//! Every field has a default, so a missing file or a partial one is fine.

use std::fs;
use std::io::ErrorKind;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wish::ExpiryPolicy;

use crate::error::{CliError, Result};

const DEFAULT_GOAL: u32 = 50;

/// When the 24h window is re-checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpiryCheck {
	/// Only at startup.
	#[default]
	OnLoad,
	/// Before every operation.
	Continuous,
}

impl From<ExpiryCheck> for ExpiryPolicy {
	fn from(check: ExpiryCheck) -> Self {
		match check {
			ExpiryCheck::OnLoad => ExpiryPolicy::OnLoad,
			ExpiryCheck::Continuous => ExpiryPolicy::Continuous,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WishConfig {
	/// Slot file. Defaults to `<config dir>/wish/wish.json`, wherever the
	/// config itself was loaded from.
	pub store_path: Option<PathBuf>,
	/// Like goal used when `upload` is given neither `--goal` nor `--no-goal`.
	pub default_goal: NonZeroU32,
	pub toast_ms: u64,
	pub pulse_ms: u64,
	pub copied_ms: u64,
	pub share_origin: String,
	pub expiry_check: ExpiryCheck,
}

impl Default for WishConfig {
	fn default() -> Self {
		Self {
			store_path: None,
			default_goal: NonZeroU32::new(DEFAULT_GOAL).unwrap_or(NonZeroU32::MIN),
			toast_ms: 3000,
			pulse_ms: 500,
			copied_ms: 2000,
			share_origin: "http://localhost:5173".to_string(),
			expiry_check: ExpiryCheck::OnLoad,
		}
	}
}

impl WishConfig {
	/// Loads configuration.
	///
	/// An explicit path must exist and parse. The default location is
	/// optional, and a malformed default file only logs a warning.
	pub fn load(explicit: Option<&Path>) -> Result<Self> {
		match explicit {
			Some(path) => Self::read(path)?.ok_or_else(|| CliError::Config {
				path: path.to_path_buf(),
				source: "file not found".into(),
			}),
			None => {
				let path = default_config_path();
				match Self::read(&path) {
					Ok(config) => Ok(config.unwrap_or_default()),
					Err(err) => {
						warn!(target = "wish.config", error = %err, "ignoring malformed config");
						Ok(Self::default())
					}
				}
			}
		}
	}

	fn read(path: &Path) -> Result<Option<Self>> {
		let content = match fs::read_to_string(path) {
			Ok(content) => content,
			Err(err) if err.kind() == ErrorKind::NotFound => {
				debug!(target = "wish.config", path = %path.display(), "no config file");
				return Ok(None);
			}
			Err(err) => {
				return Err(CliError::Config {
					path: path.to_path_buf(),
					source: err.into(),
				});
			}
		};
		serde_json::from_str(&content).map(Some).map_err(|err| CliError::Config {
			path: path.to_path_buf(),
			source: err.into(),
		})
	}

	/// Resolves the slot file: CLI override, then config, then default.
	pub fn resolve_store_path(&self, cli_override: Option<&Path>) -> PathBuf {
		cli_override
			.map(Path::to_path_buf)
			.or_else(|| self.store_path.clone())
			.unwrap_or_else(default_store_path)
	}

	pub fn expiry_policy(&self) -> ExpiryPolicy {
		self.expiry_check.into()
	}

	pub fn toast_duration(&self) -> Duration {
		Duration::from_millis(self.toast_ms)
	}

	pub fn pulse_duration(&self) -> Duration {
		Duration::from_millis(self.pulse_ms)
	}

	pub fn copied_duration(&self) -> Duration {
		Duration::from_millis(self.copied_ms)
	}
}

fn config_root() -> PathBuf {
	dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("wish")
}

fn default_config_path() -> PathBuf {
	config_root().join("config.json")
}

fn default_store_path() -> PathBuf {
	config_root().join("wish.json")
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn defaults_match_upload_view() {
		let config = WishConfig::default();
		assert_eq!(config.default_goal.get(), 50);
		assert_eq!(config.toast_duration(), Duration::from_millis(3000));
		assert_eq!(config.pulse_duration(), Duration::from_millis(500));
		assert_eq!(config.copied_duration(), Duration::from_millis(2000));
		assert_eq!(config.expiry_policy(), ExpiryPolicy::OnLoad);
	}

	#[test]
	fn partial_file_keeps_other_defaults() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("config.json");
		fs::write(&path, r#"{"defaultGoal":5,"expiryCheck":"continuous"}"#).unwrap();

		let config = WishConfig::load(Some(&path)).unwrap();
		assert_eq!(config.default_goal.get(), 5);
		assert_eq!(config.expiry_policy(), ExpiryPolicy::Continuous);
		assert_eq!(config.toast_ms, 3000);
		assert_eq!(config.share_origin, "http://localhost:5173");
	}

	#[test]
	fn explicit_missing_file_is_an_error() {
		let tmp = TempDir::new().unwrap();
		let err = WishConfig::load(Some(&tmp.path().join("nope.json"))).unwrap_err();
		assert!(matches!(err, CliError::Config { .. }));
	}

	#[test]
	fn zero_default_goal_is_rejected() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("config.json");
		fs::write(&path, r#"{"defaultGoal":0}"#).unwrap();
		assert!(WishConfig::load(Some(&path)).is_err());
	}

	#[test]
	fn store_path_precedence() {
		let config = WishConfig {
			store_path: Some(PathBuf::from("/from/config.json")),
			..Default::default()
		};
		assert_eq!(config.resolve_store_path(Some(Path::new("/from/cli.json"))), PathBuf::from("/from/cli.json"));
		assert_eq!(config.resolve_store_path(None), PathBuf::from("/from/config.json"));
		assert!(WishConfig::default().resolve_store_path(None).ends_with("wish/wish.json"));
	}
}
