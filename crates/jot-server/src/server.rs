use tokio::net::TcpListener;
use tracing::{info, warn};

use jot_actor::StoreHandle;

use crate::config::ServerConfig;
use crate::router::{build_router, AppState};

/// jotdb HTTP server.
pub struct ApiServer {
    config: ServerConfig,
    store: StoreHandle,
}

impl ApiServer {
    pub fn new(config: ServerConfig, store: StoreHandle) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState {
            store: self.store.clone(),
            family: self.config.family.clone(),
        };
        build_router(state, self.config.auth.as_ref())
    }

    /// Start serving requests.
    ///
    /// Callers must have completed the startup handshake against the store
    /// actor before this point.
    pub async fn serve(self) -> std::io::Result<()> {
        if self.config.auth.is_none() {
            warn!("no API credentials configured; the write route is open");
        }
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!(
            addr = %self.config.bind_addr,
            family = %self.config.family,
            "jotdb server listening"
        );
        axum::serve(listener, app).await
    }
}
