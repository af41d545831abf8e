use crate::relay::RelayCommand;
use crate::signaling::ConnectionTable;
use axum::extract::ws::Message;
use pairlink_core::ConnectionId;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;

/// Handle shared by every WebSocket task: registers writers and feeds
/// received frames to the relay.
#[derive(Clone)]
pub struct SignalingService {
    connections: Arc<ConnectionTable>,
    pub(crate) relay_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_tx: mpsc::Sender<RelayCommand>, connections: Arc<ConnectionTable>) -> Self {
        Self {
            connections,
            relay_tx,
        }
    }

    pub fn add_peer(&self, connection_id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.connections.add(connection_id, tx);
    }

    pub fn remove_peer(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub async fn submit(&self, command: RelayCommand) -> Result<(), SendError<RelayCommand>> {
        self.relay_tx.send(command).await
    }
}
