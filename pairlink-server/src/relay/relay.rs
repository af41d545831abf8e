use crate::registry::{CloseOutcome, JoinOutcome, SessionRegistry};
use crate::relay::RelayCommand;
use crate::signaling::SignalingOutput;
use pairlink_core::{ConnectionId, ServerEvent, SessionId, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sent to the remaining sender when the receiver of its session goes away.
pub const HOST_DISCONNECTED_MESSAGE: &str = "The host has disconnected.";

/// Single-writer actor that owns the session registry.
///
/// Every frame and every close notification goes through [`Relay::run`] one
/// at a time, so registry mutations never interleave.
pub struct Relay {
    registry: Box<dyn SessionRegistry>,
    command_rx: mpsc::Receiver<RelayCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Relay {
    pub fn new(
        registry: Box<dyn SessionRegistry>,
        command_rx: mpsc::Receiver<RelayCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry,
            command_rx,
            signaling,
        }
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!(
            "Command channel closed. Relay event loop finished with {} open rooms",
            self.registry.session_count()
        );
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Inbound {
                connection_id,
                text,
            } => self.handle_inbound(connection_id, text).await,
            RelayCommand::Disconnect { connection_id } => {
                self.handle_disconnect(connection_id).await
            }
        }
    }

    async fn handle_inbound(&mut self, connection_id: ConnectionId, text: String) {
        let message = match SignalMessage::parse(&text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Invalid SignalMessage from {}: {}", connection_id, e);
                return;
            }
        };

        match message {
            SignalMessage::Create { room_id } => self.create_room(connection_id, room_id),
            SignalMessage::Join { room_id } => self.join_room(connection_id, room_id).await,
            SignalMessage::Offer { room_id }
            | SignalMessage::Answer { room_id }
            | SignalMessage::Candidate { room_id } => {
                self.forward(connection_id, room_id, text).await
            }
            SignalMessage::Unknown => {
                debug!("Ignoring frame of unknown type from {}", connection_id)
            }
        }
    }

    fn create_room(&mut self, connection_id: ConnectionId, room_id: SessionId) {
        match self.registry.create(room_id.clone(), connection_id) {
            Ok(outcome) => {
                if let Some(previous) = outcome.replaced {
                    warn!(
                        "Room {} taken over: receiver {} replaced by {}",
                        room_id, previous, connection_id
                    );
                }
                info!("Room created: {} (receiver {})", room_id, connection_id);
            }
            Err(e) => warn!(
                "Rejected create of room {} from {}: {}",
                room_id, connection_id, e
            ),
        }
    }

    async fn join_room(&mut self, connection_id: ConnectionId, room_id: SessionId) {
        match self.registry.join(&room_id, connection_id) {
            Ok(JoinOutcome { receiver, replaced }) => {
                if let Some(previous) = replaced {
                    info!(
                        "Sender {} of room {} replaced by {}",
                        previous, room_id, connection_id
                    );
                }
                if self.signaling.is_open(&receiver) {
                    self.signaling
                        .send_event(&receiver, ServerEvent::UserJoined)
                        .await;
                }
                info!("User {} joined room {}", connection_id, room_id);
            }
            Err(e) => {
                warn!("Join of room {} by {} failed: {:?}", room_id, connection_id, e);
                self.signaling
                    .send_event(&connection_id, ServerEvent::error(e.to_string()))
                    .await;
            }
        }
    }

    /// Pass `text` unchanged to the other endpoint of the sender's room.
    /// Anything that cannot be delivered right now is dropped.
    async fn forward(&self, from: ConnectionId, room_id: SessionId, text: String) {
        let Some((bound, _)) = self.registry.session_of(&from) else {
            debug!("Dropping relay frame from unpaired connection {}", from);
            return;
        };
        if room_id != bound {
            debug!(
                "Dropping relay frame from {}: names room {} but belongs to {}",
                from, room_id, bound
            );
            return;
        }

        let Some(peer) = self.registry.resolve_peer(&from) else {
            debug!("No peer in room {} yet, dropping frame from {}", bound, from);
            return;
        };
        if !self.signaling.is_open(&peer) {
            debug!("Peer {} in room {} is not open, dropping frame", peer, bound);
            return;
        }

        self.signaling.send_text(&peer, text).await;
    }

    async fn handle_disconnect(&mut self, connection_id: ConnectionId) {
        match self.registry.remove_connection(&connection_id) {
            CloseOutcome::Unbound => {
                debug!("Connection {} closed without a room", connection_id)
            }
            CloseOutcome::HostLeft { session_id, sender } => {
                info!("Host {} left, room {} closed", connection_id, session_id);
                if let Some(sender) = sender {
                    if self.signaling.is_open(&sender) {
                        self.signaling
                            .send_event(&sender, ServerEvent::error(HOST_DISCONNECTED_MESSAGE))
                            .await;
                    }
                }
            }
            CloseOutcome::SenderLeft { session_id, .. } => {
                info!("Sender {} left room {}", connection_id, session_id);
            }
        }
    }
}
