use std::time::Duration;

use jot_store::StoreError;

/// Per-request failures reported by the actor.
///
/// None of these terminate the actor; it answers the failing request and
/// moves on to the next one.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// `get`/`delete` named a key that is not present.
    #[error("key {key:?} not found in family {family:?}")]
    NotFound { family: String, key: String },

    /// The request violated the shape rules for its action.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The persistence backend failed.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

/// Caller-side failures of a bounded call.
///
/// A `Timeout` means this caller stopped waiting — it says nothing about
/// whether the actor is alive or whether the request will still run.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No reply arrived within the configured bound.
    #[error("store did not respond within {0:?}")]
    Timeout(Duration),

    /// The actor is no longer running (its channel closed).
    #[error("store actor is not running")]
    Closed,

    /// The actor replied with a per-request error.
    #[error(transparent)]
    Actor(#[from] ActorError),
}

impl CallError {
    /// `true` if retrying the same call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Fatal failures of the startup handshake.
///
/// These are the only errors in the system that should abort the process:
/// the service must not serve HTTP traffic with an unverified backend.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The actor never sent its initial acknowledgment.
    #[error("startup handshake failed: {0}")]
    Handshake(#[source] CallError),

    /// The actor failed to load persisted state.
    #[error("store initialization failed: {0}")]
    Init(#[source] ActorError),

    /// The liveness probe through the main request path failed.
    #[error("liveness probe failed: {0}")]
    Probe(#[source] CallError),
}
