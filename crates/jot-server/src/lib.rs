//! HTTP adapter for jotdb.
//!
//! Translates each route into one or two bounded calls against the store
//! actor and renders the tagged reply as a JSON body. The adapter holds no
//! store state of its own — a [`StoreHandle`](jot_actor::StoreHandle) in
//! shared state is its only path to the data.
//!
//! Failures surface as client-facing error responses with distinct status
//! codes (not found, timeout, storage failure); no handler can terminate
//! the process.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{BasicAuth, ServerConfig};
pub use error::ApiError;
pub use router::{build_router, AppState};
pub use server::ApiServer;
