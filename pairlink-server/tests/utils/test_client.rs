use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::signal_helpers::{SIGNAL_TIMEOUT_MS, SILENCE_MS};

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Browser stand-in talking to a real relay over WebSocket.
pub struct TestClient {
    stream: WsStream,
}

impl TestClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let (stream, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        Ok(Self { stream })
    }

    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream
            .send(Message::Text(text.to_owned().into()))
            .await
            .context("Failed to send text frame")
    }

    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        self.stream
            .send(Message::Binary(data.into()))
            .await
            .context("Failed to send binary frame")
    }

    /// Next text frame, skipping control frames.
    pub async fn recv_text(&mut self) -> Result<String> {
        let timeout = Duration::from_millis(SIGNAL_TIMEOUT_MS);
        loop {
            let frame = tokio::time::timeout(timeout, self.stream.next())
                .await
                .context("Timeout waiting for frame")?
                .context("Stream ended")?
                .context("WebSocket error")?;
            match frame {
                Message::Text(text) => return Ok(text.as_str().to_owned()),
                Message::Close(_) => anyhow::bail!("Connection closed by relay"),
                _ => continue,
            }
        }
    }

    pub async fn recv_json(&mut self) -> Result<Value> {
        let text = self.recv_text().await?;
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON: {}", text))
    }

    /// Fails if a text frame arrives within the silence window.
    pub async fn expect_silence(&mut self) -> Result<()> {
        match tokio::time::timeout(Duration::from_millis(SILENCE_MS), self.recv_text()).await {
            Err(_) => Ok(()),
            Ok(Ok(text)) => anyhow::bail!("Unexpected frame {}", text),
            Ok(Err(e)) => Err(e),
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.context("Failed to close")
    }
}
