use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use pairlink_core::ConnectionId;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Writer handles of every live WebSocket, keyed by connection.
#[derive(Default)]
pub struct ConnectionTable {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(connection_id, tx);
    }

    pub fn remove(&self, connection_id: &ConnectionId) {
        self.peers.remove(connection_id);
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[async_trait]
impl SignalingOutput for ConnectionTable {
    fn is_open(&self, connection_id: &ConnectionId) -> bool {
        self.peers
            .get(connection_id)
            .is_some_and(|tx| !tx.is_closed())
    }

    async fn send_text(&self, connection_id: &ConnectionId, text: String) {
        let Some(peer) = self.peers.get(connection_id) else {
            debug!("Dropping frame for disconnected connection {}", connection_id);
            return;
        };
        if let Err(e) = peer.send(Message::Text(text.into())) {
            error!("Failed to send WS message to {}: {:?}", connection_id, e);
        }
    }
}
