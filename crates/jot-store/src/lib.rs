//! Persistence backends for jotdb.
//!
//! The store actor owns all state in memory; a [`StoreBackend`] is the
//! durability collaborator behind it. The contract is deliberately small:
//! load everything at startup, persist one entry durably, enumerate a
//! family's keys, remove an entry. On-disk representation is the backend's
//! business — the actor never interprets it.
//!
//! # Backends
//!
//! - [`JsonFileStore`] — one JSON document per family under a data
//!   directory; writes are temp-file + rename so a crash never leaves a
//!   half-written family document
//! - [`InMemoryStore`] — `BTreeMap`-backed store for tests and embedding
//!
//! All maps are `BTreeMap` so key enumeration is ascending lexicographic
//! and stable for a given snapshot, on disk and in memory alike.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::{Families, FamilyMap, StoreBackend};
