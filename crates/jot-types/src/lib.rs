//! Message types for jotdb.
//!
//! These are the values exchanged across the store actor boundary. HTTP
//! handlers build a [`Request`], send it to the actor, and receive a tagged
//! [`Reply`] back. Nothing in this crate touches storage or channels; it is
//! the shared vocabulary every other jotdb crate depends on.
//!
//! # Key Types
//!
//! - [`Request`] — a single operation against the store: family, key, value, action
//! - [`Action`] — the closed set of verbs the actor understands
//! - [`Reply`] — tagged result: a value, a key listing, or nothing
//! - [`ParseActionError`] — rejection for action strings outside the verb set

pub mod action;
pub mod reply;
pub mod request;

pub use action::{Action, ParseActionError};
pub use reply::Reply;
pub use request::Request;

/// Reserved key whose stored value names the most recently written key in
/// the same family (the latest-pointer convention). Resolving the newest
/// entry is two `get`s: this key first, then the key it points at.
pub const LATEST_KEY: &str = "latest";
