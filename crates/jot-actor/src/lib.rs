//! The jotdb store actor.
//!
//! All store state is owned by one tokio task. Callers never touch the
//! state directly; they send a [`Request`](jot_types::Request) through a
//! [`StoreHandle`] and wait — bounded by a timeout — for the actor's reply.
//! Because the actor dequeues one request at a time and runs it to
//! completion, every request/response pair observes a single global order
//! with no interleaved partial mutations, and the store itself needs no
//! locks.
//!
//! # Components
//!
//! - [`spawn_store_actor`] — starts the actor task over a
//!   [`StoreBackend`](jot_store::StoreBackend), returning the handle and
//!   the startup channel
//! - [`StoreHandle`] — cloneable entry point; owns the inbox sender and the
//!   configured call timeout
//! - [`bounded_recv`] — the timeout-bounded receive underneath every call
//! - [`startup::await_ready`] — the handshake that must succeed before any
//!   HTTP traffic is served
//!
//! # Call discipline
//!
//! Every request carries its own oneshot reply channel. A caller that times
//! out drops its receiver; the actor's later send fails without blocking
//! and the late reply is discarded. Replies can never cross between
//! callers, and the actor can never be left holding an unconsumed send.

pub mod actor;
pub mod error;
pub mod handle;
pub mod startup;

pub use actor::{spawn_store_actor, ActorConfig, StartupAck};
pub use error::{ActorError, CallError, StartupError};
pub use handle::{bounded_recv, StoreHandle};
