//! Single-slot persistence backends.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;

/// One durable key holding the serialized wish.
pub trait SlotStore {
	/// Returns the raw slot contents, or `None` when the slot is empty.
	fn read_slot(&self) -> Result<Option<String>>;

	/// Replaces the slot contents.
	fn write_slot(&self, contents: &str) -> Result<()>;

	/// Empties the slot. Returns `true` if there was something to remove.
	fn clear_slot(&self) -> Result<bool>;
}

/// Slot backed by a single JSON file.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never observes a half-written slot.
#[derive(Debug, Clone)]
pub struct FileSlot {
	path: PathBuf,
}

impl FileSlot {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn temp_path(&self) -> PathBuf {
		let name = self.path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_else(|| "slot".to_string());
		self.path.with_file_name(format!(".{name}.tmp"))
	}
}

impl SlotStore for FileSlot {
	fn read_slot(&self) -> Result<Option<String>> {
		match fs::read_to_string(&self.path) {
			Ok(contents) => Ok(Some(contents)),
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
			Err(err) => Err(err.into()),
		}
	}

	fn write_slot(&self, contents: &str) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let temp = self.temp_path();
		fs::write(&temp, contents)?;
		fs::rename(&temp, &self.path)?;
		debug!(target = "wish.store", path = %self.path.display(), bytes = contents.len(), "slot written");
		Ok(())
	}

	fn clear_slot(&self) -> Result<bool> {
		match fs::remove_file(&self.path) {
			Ok(()) => {
				debug!(target = "wish.store", path = %self.path.display(), "slot cleared");
				Ok(true)
			}
			Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}
}

/// In-process slot. Clones share the same contents, which lets a test drop a
/// session and load a fresh one over the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot(Arc<Mutex<Option<String>>>);

impl MemorySlot {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds the slot with raw contents.
	pub fn with_contents(contents: impl Into<String>) -> Self {
		Self(Arc::new(Mutex::new(Some(contents.into()))))
	}

	pub fn contents(&self) -> Option<String> {
		self.0.lock().clone()
	}
}

impl SlotStore for MemorySlot {
	fn read_slot(&self) -> Result<Option<String>> {
		Ok(self.0.lock().clone())
	}

	fn write_slot(&self, contents: &str) -> Result<()> {
		*self.0.lock() = Some(contents.to_string());
		Ok(())
	}

	fn clear_slot(&self) -> Result<bool> {
		Ok(self.0.lock().take().is_some())
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn file_slot_missing_reads_as_empty() {
		let tmp = TempDir::new().unwrap();
		let slot = FileSlot::new(tmp.path().join("wish.json"));
		assert_eq!(slot.read_slot().unwrap(), None);
		assert!(!slot.clear_slot().unwrap());
	}

	#[test]
	fn file_slot_write_creates_parents_and_leaves_no_temp() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("nested/dir/wish.json");
		let slot = FileSlot::new(&path);

		slot.write_slot("{\"a\":1}").unwrap();
		slot.write_slot("{\"a\":2}").unwrap();

		assert_eq!(slot.read_slot().unwrap().as_deref(), Some("{\"a\":2}"));
		let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().map(|e| e.unwrap().file_name()).collect();
		assert_eq!(entries, vec![std::ffi::OsString::from("wish.json")]);
	}

	#[test]
	fn file_slot_clear_removes_file() {
		let tmp = TempDir::new().unwrap();
		let slot = FileSlot::new(tmp.path().join("wish.json"));
		slot.write_slot("x").unwrap();

		assert!(slot.clear_slot().unwrap());
		assert!(!slot.path().exists());
		assert!(!slot.clear_slot().unwrap());
	}

	#[test]
	fn memory_slot_clones_share_contents() {
		let slot = MemorySlot::new();
		let handle = slot.clone();
		slot.write_slot("hello").unwrap();
		assert_eq!(handle.contents().as_deref(), Some("hello"));
		assert!(handle.clear_slot().unwrap());
		assert_eq!(slot.read_slot().unwrap(), None);
	}
}
