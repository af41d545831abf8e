
use anyhow::Result;
use pairlink_server::{MemorySessionRegistry, Relay, RelayCommand, build_router, spawn_relay};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::{MockSignalingOutput, Outbound};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Relay actor wired to a mock transport.
pub fn create_test_relay() -> (
    mpsc::Sender<RelayCommand>,
    mpsc::UnboundedReceiver<Outbound>,
    MockSignalingOutput,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<RelayCommand>(100);
    let (signaling, outbound_rx) = MockSignalingOutput::new();

    let relay = Relay::new(
        Box::new(MemorySessionRegistry::new()),
        cmd_rx,
        Arc::new(signaling.clone()),
    );

    tokio::spawn(async move {
        relay.run().await;
    });

    (cmd_tx, outbound_rx, signaling)
}

/// Full HTTP + WebSocket app on an ephemeral port. Returns the ws:// URL.
pub async fn boot_server() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let service = spawn_relay(Box::new(MemorySessionRegistry::new()));
    let app = build_router(service, std::env::temp_dir().join("pairlink-no-assets"));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("ws://{}/", addr))
}
