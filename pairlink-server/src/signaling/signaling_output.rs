use async_trait::async_trait;
use pairlink_core::{ConnectionId, ServerEvent};
use tracing::error;

/// Outbound side of the transport, as seen by the relay.
///
/// Sends are fire-and-forget: a frame addressed to a connection that is
/// gone is dropped without reporting back.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Whether frames sent to `connection_id` can still reach the socket.
    fn is_open(&self, connection_id: &ConnectionId) -> bool;

    /// Send a text frame exactly as given.
    async fn send_text(&self, connection_id: &ConnectionId, text: String);

    async fn send_event(&self, connection_id: &ConnectionId, event: ServerEvent) {
        match event.to_json() {
            Ok(json) => self.send_text(connection_id, json).await,
            Err(e) => error!("Failed to serialize server event {:?}: {}", event, e),
        }
    }
}
