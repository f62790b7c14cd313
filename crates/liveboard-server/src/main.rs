//! Liveboard service entry point.
//!
//! Wires the full pipeline: loads the persisted ledger, starts the
//! single-writer apply loop and the read API server, and hands the
//! [`EventSink`] to the upstream connector. On `Ctrl-C` the sink is
//! dropped so the worker drains in-flight events and performs the final
//! snapshot flush before the process exits.
//!
//! The live-event connector itself is an external collaborator: its
//! connection lifecycle, protocol, and reconnection logic live outside
//! this workspace. It receives the configured channel identity and the
//! sink, and calls `sink.submit(kind_tag, payload)` once per upstream
//! occurrence.

use std::sync::Arc;

use liveboard_observer::{AppState, ServerConfig, start_server};
use liveboard_server::{ApplyWorker, EventSink, ServerSettings};
use liveboard_store::SnapshotStore;
use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid; runtime faults
/// (persistence, transport) are logged and absorbed instead.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("liveboard-server starting");

    let settings = ServerSettings::from_env()?;
    info!(
        channel = settings.channel,
        data_file = %settings.data_file.display(),
        flush_ms = settings.flush_ms,
        queue_capacity = settings.queue_capacity,
        "configuration loaded"
    );

    // Restore the ledger; a missing or corrupt snapshot starts empty.
    let store = SnapshotStore::new(&settings.data_file);
    let ledger = Arc::new(RwLock::new(store.load()));

    // Single-writer apply loop.
    let (sink, rx) = EventSink::channel(settings.queue_capacity);
    let worker =
        ApplyWorker::new(Arc::clone(&ledger), store, settings.flush_policy(), rx).spawn();

    // Read API, served concurrently with the writer.
    let state = Arc::new(AppState::new(ledger));
    let server_config = ServerConfig {
        host: settings.host.clone(),
        port: settings.port,
    };
    let server = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config, state).await {
            error!(error = %e, "read API exited with error");
        }
    });

    // The connector collaborator subscribes to `settings.channel` and
    // feeds `sink`. Each of its per-kind callbacks reduces to one line:
    // `sink.submit("like", &payload).await` and so on.
    info!(channel = settings.channel, "event sink ready for connector");

    tokio::signal::ctrl_c().await?;
    info!("shutdown requested, draining event queue");

    // Dropping the last sink closes the channel; the worker drains and
    // runs its final flush.
    drop(sink);
    let _ = worker.await;

    server.abort();
    info!("liveboard-server stopped");
    Ok(())
}
