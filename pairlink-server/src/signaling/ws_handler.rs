use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use pairlink_core::ConnectionId;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Drive one accepted WebSocket until either direction fails, then report
/// the closure to the relay.
pub async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let connection_id = ConnectionId::new();
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(connection_id, tx);
    info!(
        "New WebSocket connection: {} ({} open)",
        connection_id,
        service.connection_count()
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                let text = match msg {
                    Message::Text(text) => text.as_str().to_owned(),
                    Message::Binary(data) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!("Non UTF-8 binary frame from {}: {}", connection_id, e);
                            continue;
                        }
                    },
                    Message::Close(_) => break,
                    _ => continue,
                };

                let cmd = RelayCommand::Inbound {
                    connection_id,
                    text,
                };
                if let Err(e) = service.submit(cmd).await {
                    error!("Relay died: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_peer(&connection_id);
    let _ = service
        .submit(RelayCommand::Disconnect { connection_id })
        .await;
    info!("WebSocket disconnected: {}", connection_id);
}
