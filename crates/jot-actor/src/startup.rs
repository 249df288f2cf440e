use tokio::sync::oneshot;
use tracing::info;

use jot_types::Request;

use crate::actor::StartupAck;
use crate::error::StartupError;
use crate::handle::{bounded_recv, StoreHandle};

/// Family holding the well-known liveness entry.
pub const HEALTHCHECK_FAMILY: &str = "healthcheck";
/// Key of the liveness entry.
pub const HEALTHCHECK_KEY: &str = "h";
/// Value the sequencer writes and `/health` reads back.
pub const HEALTHCHECK_VALUE: &str = "OK";

/// Prove the actor is alive and initialized before serving any traffic.
///
/// Two phases, both bounded by the handle's call timeout and both fatal on
/// failure:
///
/// 1. wait for the actor's acknowledgment on the startup channel, which it
///    sends only after loading all persisted state;
/// 2. write the well-known healthcheck entry through the main request path,
///    confirming the actor has reached its serving phase.
///
/// Callers must treat an error as fatal to process startup — the service
/// must not begin serving HTTP traffic with an unverified backend.
pub async fn await_ready(
    handle: &StoreHandle,
    startup: oneshot::Receiver<StartupAck>,
) -> Result<(), StartupError> {
    bounded_recv(startup, handle.call_timeout())
        .await
        .map_err(StartupError::Handshake)?
        .map_err(StartupError::Init)?;
    info!("store actor acknowledged startup");

    handle
        .call(Request::set(
            HEALTHCHECK_FAMILY,
            HEALTHCHECK_KEY,
            HEALTHCHECK_VALUE,
        ))
        .await
        .map_err(StartupError::Probe)?;
    info!(
        family = HEALTHCHECK_FAMILY,
        key = HEALTHCHECK_KEY,
        "liveness probe written"
    );
    Ok(())
}
