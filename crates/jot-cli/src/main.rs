use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use jot_actor::{spawn_store_actor, startup, ActorConfig};
use jot_server::{ApiServer, BasicAuth, ServerConfig};
use jot_store::JsonFileStore;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = cli::Cli::parse();

    let backend = JsonFileStore::open(&cli.data_dir)
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;

    let config = ActorConfig {
        call_timeout: Duration::from_secs(cli.timeout_secs),
        ..Default::default()
    };
    let (store, startup_rx) = spawn_store_actor(backend, config);

    // The only process-fatal error path: an unverified backend must never
    // serve traffic.
    startup::await_ready(&store, startup_rx)
        .await
        .context("store actor failed its startup handshake")?;
    info!("store actor verified, starting HTTP server");

    let server = ApiServer::new(
        ServerConfig {
            bind_addr: cli.bind,
            family: cli.family,
            auth: BasicAuth::from_env(),
        },
        store,
    );
    server.serve().await.context("HTTP server failed")?;
    Ok(())
}
