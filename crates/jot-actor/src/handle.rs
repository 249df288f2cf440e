use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use jot_types::{Reply, Request};

use crate::actor::Envelope;
use crate::error::CallError;

/// Cloneable entry point to the store actor.
///
/// The handle owns the inbox sender and the configured call timeout; it is
/// the only way to reach store state. Each call gets a private reply
/// channel, so any number of clones may issue calls concurrently without
/// replies crossing between them.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<Envelope>,
    call_timeout: Duration,
}

impl StoreHandle {
    pub(crate) fn new(tx: mpsc::Sender<Envelope>, call_timeout: Duration) -> Self {
        Self { tx, call_timeout }
    }

    /// The bound applied to every call through this handle.
    pub fn call_timeout(&self) -> Duration {
        self.call_timeout
    }

    /// A copy of this handle with a different call timeout.
    pub fn with_call_timeout(&self, call_timeout: Duration) -> Self {
        Self {
            tx: self.tx.clone(),
            call_timeout,
        }
    }

    /// Send `request` to the actor and wait — bounded — for its reply.
    ///
    /// On timeout the request is not retracted: the actor will still run it
    /// to completion, and its reply is dropped on the closed channel.
    pub async fn call(&self, request: Request) -> Result<Reply, CallError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let action = request.action;
        self.tx
            .send(Envelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| CallError::Closed)?;

        let result = bounded_recv(reply_rx, self.call_timeout).await;
        if let Err(ref e) = result {
            debug!(%action, error = %e, "bounded call failed");
        }
        Ok(result??)
    }

    #[cfg(test)]
    pub(crate) fn sender(&self) -> &mpsc::Sender<Envelope> {
        &self.tx
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}

/// Wait up to `timeout` for a value on `rx`.
///
/// Exactly one of three things happens: the value arrives first and is
/// returned; the timer fires first and the receiver is dropped, leaving the
/// sender's eventual send to fail harmlessly; or the sender is already gone
/// and the wait ends immediately with [`CallError::Closed`].
pub async fn bounded_recv<T>(
    rx: oneshot::Receiver<T>,
    timeout: Duration,
) -> Result<T, CallError> {
    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(CallError::Closed),
        Err(_) => Err(CallError::Timeout(timeout)),
    }
}
