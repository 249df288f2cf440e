use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use jot_store::{Families, StoreBackend};
use jot_types::{Action, Reply, Request};

use crate::error::ActorError;
use crate::handle::StoreHandle;

/// Configuration for the store actor and its handle.
#[derive(Clone, Debug)]
pub struct ActorConfig {
    /// Upper bound every caller waits for a reply.
    pub call_timeout: Duration,
    /// Capacity of the inbox; senders queue (briefly) when it is full.
    pub mailbox_capacity: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(5),
            mailbox_capacity: 64,
        }
    }
}

/// One queued call: the request plus its private reply channel.
///
/// The oneshot sender is the "buffered channel of size one" that lets the
/// actor answer without ever blocking, even if the caller already gave up.
pub(crate) struct Envelope {
    pub(crate) request: Request,
    pub(crate) reply: oneshot::Sender<Result<Reply, ActorError>>,
}

/// What the actor announces on the startup channel after loading state.
pub type StartupAck = Result<Reply, ActorError>;

/// Start the store actor over `backend`.
///
/// Returns the handle callers use from then on, plus the startup channel
/// the sequencer must drain before the service accepts traffic. The actor
/// runs until every clone of the handle is dropped.
pub fn spawn_store_actor<B: StoreBackend + 'static>(
    backend: B,
    config: ActorConfig,
) -> (StoreHandle, oneshot::Receiver<StartupAck>) {
    let (tx, rx) = mpsc::channel(config.mailbox_capacity);
    let (ready_tx, ready_rx) = oneshot::channel();

    let actor = StoreActor {
        backend,
        families: Families::new(),
    };
    tokio::spawn(actor.run(rx, ready_tx));

    (StoreHandle::new(tx, config.call_timeout), ready_rx)
}

struct StoreActor<B> {
    backend: B,
    families: Families,
}

impl<B: StoreBackend> StoreActor<B> {
    async fn run(
        mut self,
        mut inbox: mpsc::Receiver<Envelope>,
        ready: oneshot::Sender<StartupAck>,
    ) {
        // START phase: the only permitted output is the startup ack.
        match self.backend.load_all() {
            Ok(families) => {
                info!(families = families.len(), "store actor ready");
                self.families = families;
                let _ = ready.send(Ok(Reply::Empty));
            }
            Err(e) => {
                error!(error = %e, "store actor failed to load persisted state");
                let _ = ready.send(Err(ActorError::Storage(e)));
                return;
            }
        }

        // READY phase: one request at a time, one reply per request, until
        // the last handle is dropped.
        while let Some(Envelope { request, reply }) = inbox.recv().await {
            let result = self.handle_request(request);
            // A caller that timed out has dropped its receiver; the send
            // fails without blocking and the late reply is discarded.
            let _ = reply.send(result);
        }
        debug!("store actor inbox closed, shutting down");
    }

    fn handle_request(&mut self, request: Request) -> Result<Reply, ActorError> {
        if let Some(violation) = request.shape_violation() {
            return Err(ActorError::InvalidRequest(violation.to_string()));
        }

        let Request {
            family,
            key,
            value,
            action,
        } = request;

        match action {
            Action::Set => {
                // Durable before the reply: the caller may assume the write
                // is committed once it observes success.
                self.backend.persist_entry(&family, &key, &value)?;
                self.families.entry(family).or_default().insert(key, value);
                Ok(Reply::Empty)
            }
            Action::Get => self
                .families
                .get(&family)
                .and_then(|entries| entries.get(&key))
                .map(|v| Reply::Value(v.clone()))
                .ok_or(ActorError::NotFound { family, key }),
            Action::Delete => {
                if !self.backend.remove_entry(&family, &key)? {
                    return Err(ActorError::NotFound { family, key });
                }
                if let Some(entries) = self.families.get_mut(&family) {
                    entries.remove(&key);
                }
                Ok(Reply::Empty)
            }
            // Reads never touch the backend; the in-memory families map is
            // the single source of truth once load_all has run.
            Action::ListKeys => Ok(Reply::KeyList(
                self.families
                    .get(&family)
                    .map(|entries| entries.keys().cloned().collect())
                    .unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use jot_store::{InMemoryStore, StoreError, StoreResult};

    use crate::startup;

    async fn ready_handle() -> StoreHandle {
        let (handle, startup_rx) =
            spawn_store_actor(InMemoryStore::new(), ActorConfig::default());
        startup::await_ready(&handle, startup_rx).await.unwrap();
        handle
    }

    #[tokio::test]
    async fn set_then_get_returns_the_written_value() {
        let handle = ready_handle().await;

        let ack = handle.call(Request::set("f", "k", "v1")).await.unwrap();
        assert_eq!(ack, Reply::Empty);

        let reply = handle.call(Request::get("f", "k")).await.unwrap();
        assert_eq!(reply, Reply::Value("v1".into()));
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let handle = ready_handle().await;

        handle.call(Request::set("f", "k", "old")).await.unwrap();
        handle.call(Request::set("f", "k", "new")).await.unwrap();

        let reply = handle.call(Request::get("f", "k")).await.unwrap();
        assert_eq!(reply, Reply::Value("new".into()));
    }

    #[tokio::test]
    async fn list_keys_returns_each_set_key_once() {
        let handle = ready_handle().await;

        for key in ["c", "a", "b"] {
            handle.call(Request::set("f", key, "x")).await.unwrap();
        }

        let reply = handle.call(Request::list_keys("f")).await.unwrap();
        // Committed order: ascending lexicographic, no duplicates.
        assert_eq!(reply, Reply::KeyList(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[tokio::test]
    async fn list_keys_on_unknown_family_is_empty() {
        let handle = ready_handle().await;

        let reply = handle.call(Request::list_keys("nothing")).await.unwrap();
        assert_eq!(reply, Reply::KeyList(vec![]));
    }

    #[tokio::test]
    async fn get_on_missing_key_is_not_found() {
        let handle = ready_handle().await;
        handle.call(Request::set("f", "present", "v")).await.unwrap();

        let err = handle.call(Request::get("f", "absent")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::NotFound { .. })
        ));

        // The actor is still serving.
        let reply = handle.call(Request::get("f", "present")).await.unwrap();
        assert_eq!(reply, Reply::Value("v".into()));
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let handle = ready_handle().await;
        handle.call(Request::set("f", "k", "v")).await.unwrap();

        handle.call(Request::delete("f", "k")).await.unwrap();

        let err = handle.call(Request::get("f", "k")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::NotFound { .. })
        ));

        // Deleting again reports not-found.
        let err = handle.call(Request::delete("f", "k")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn malformed_request_is_rejected_without_killing_the_actor() {
        let handle = ready_handle().await;

        let err = handle.call(Request::get("", "k")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::InvalidRequest(_))
        ));

        let err = handle.call(Request::set("f", "", "v")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::InvalidRequest(_))
        ));

        handle.call(Request::set("f", "k", "v")).await.unwrap();
    }

    #[tokio::test]
    async fn set_is_persisted_before_the_reply() {
        let backend = Arc::new(InMemoryStore::new());
        let (handle, startup_rx) =
            spawn_store_actor(Arc::clone(&backend), ActorConfig::default());
        startup::await_ready(&handle, startup_rx).await.unwrap();

        handle.call(Request::set("f", "k", "v")).await.unwrap();

        // Once the call returned, the backend already holds the entry.
        let families = backend.load_all().unwrap();
        assert_eq!(families["f"]["k"], "v");
    }

    /// Backend whose writes always fail, for the persistence-error path.
    struct BrokenDisk;

    impl StoreBackend for BrokenDisk {
        fn load_all(&self) -> StoreResult<Families> {
            Ok(Families::new())
        }

        fn persist_entry(&self, _family: &str, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn list_keys(&self, _family: &str) -> StoreResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn remove_entry(&self, _family: &str, _key: &str) -> StoreResult<bool> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn persistence_failure_is_reported_per_request() {
        let (handle, startup_rx) = spawn_store_actor(BrokenDisk, ActorConfig::default());
        // The handshake ack itself arrives; only the probe write fails.
        let err = startup::await_ready(&handle, startup_rx).await.unwrap_err();
        assert!(matches!(err, crate::StartupError::Probe(_)));

        // The actor survived the failed write and keeps answering.
        let err = handle.call(Request::set("f", "k", "v")).await.unwrap_err();
        assert!(matches!(
            err,
            crate::CallError::Actor(ActorError::Storage(_))
        ));
        let reply = handle.call(Request::list_keys("f")).await.unwrap();
        assert_eq!(reply, Reply::KeyList(vec![]));
    }

    /// Backend whose key enumeration always fails. Reads are served from
    /// the actor's in-memory snapshot, so callers never see this error.
    struct WriteOnlyDisk;

    impl StoreBackend for WriteOnlyDisk {
        fn load_all(&self) -> StoreResult<Families> {
            let mut families = Families::new();
            families
                .entry("f".to_string())
                .or_default()
                .insert("seeded".to_string(), "v0".to_string());
            Ok(families)
        }

        fn persist_entry(&self, _family: &str, _key: &str, _value: &str) -> StoreResult<()> {
            Ok(())
        }

        fn list_keys(&self, _family: &str) -> StoreResult<Vec<String>> {
            Err(StoreError::Io(std::io::Error::other("unreadable")))
        }

        fn remove_entry(&self, _family: &str, _key: &str) -> StoreResult<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn list_keys_is_answered_from_the_in_memory_snapshot() {
        let (handle, startup_rx) = spawn_store_actor(WriteOnlyDisk, ActorConfig::default());
        startup::await_ready(&handle, startup_rx).await.unwrap();

        handle.call(Request::set("f", "added", "v1")).await.unwrap();

        // Loaded and written keys both appear, without a backend read.
        let reply = handle.call(Request::list_keys("f")).await.unwrap();
        assert_eq!(
            reply,
            Reply::KeyList(vec!["added".into(), "seeded".into()])
        );
    }

    #[tokio::test]
    async fn abandoned_reply_does_not_wedge_the_actor() {
        let handle = ready_handle().await;

        // Send an envelope and immediately drop its receiver, simulating a
        // caller that timed out before the reply was sent.
        let (reply_tx, reply_rx) = oneshot::channel();
        handle
            .sender()
            .send(Envelope {
                request: Request::set("f", "k", "v"),
                reply: reply_tx,
            })
            .await
            .unwrap();
        drop(reply_rx);

        // The actor processed it and is ready for the next caller.
        let reply = handle.call(Request::get("f", "k")).await.unwrap();
        assert_eq!(reply, Reply::Value("v".into()));
    }

    #[tokio::test]
    async fn requests_from_one_caller_are_served_in_order() {
        let handle = ready_handle().await;

        for i in 0..20 {
            handle
                .call(Request::set("f", "k", i.to_string()))
                .await
                .unwrap();
        }

        // Program order preserved: the last write wins.
        let reply = handle.call(Request::get("f", "k")).await.unwrap();
        assert_eq!(reply, Reply::Value("19".into()));
    }

    #[tokio::test]
    async fn actor_drains_queued_work_then_stops_when_all_handles_drop() {
        let (handle, startup_rx) =
            spawn_store_actor(InMemoryStore::new(), ActorConfig::default());
        startup::await_ready(&handle, startup_rx).await.unwrap();

        let weak = handle.sender().downgrade();
        let (reply_tx, reply_rx) = oneshot::channel();
        handle
            .sender()
            .send(Envelope {
                request: Request::set("f", "k", "v"),
                reply: reply_tx,
            })
            .await
            .unwrap();

        let clone = handle.clone();
        drop(handle);
        drop(clone);

        // Work queued before the last drop still completes.
        assert_eq!(reply_rx.await.unwrap().unwrap(), Reply::Empty);
        // Every sender is gone, so the inbox is closed and the task exits.
        assert!(weak.upgrade().is_none());
    }
}
