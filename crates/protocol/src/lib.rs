//! Wire types for the persisted wish slot.
//!
//! This crate contains the serde-serializable shapes written to and read
//! from the single persisted slot, plus the data-URL encoding used for the
//! photo payload. These types represent the "storage layer": the data as it
//! appears on disk.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the slot: Field names match the stored JSON exactly
//! * Stable: Changes only when the stored format changes
//!
//! Invariant checking and lifecycle rules live on top of these types in `wish-rs`.

pub mod data_url;
pub mod slot;

pub use data_url::*;
pub use slot::*;
