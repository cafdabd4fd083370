use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use super::signal_helpers::{SIGNAL_TIMEOUT_MS, SILENCE_MS};

pub struct WsTestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsTestClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self> {
        let (stream, _) = connect_async(format!("ws://{addr}/"))
            .await
            .context("Failed to connect to relay")?;
        Ok(Self { stream })
    }

    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream
            .send(Message::text(text.to_string()))
            .await
            .context("Failed to send text frame")
    }

    pub async fn send_binary(&mut self, data: Vec<u8>) -> Result<()> {
        self.stream
            .send(Message::binary(data))
            .await
            .context("Failed to send binary frame")
    }

    /// Next text frame, or `None` if nothing arrives in time or the socket closed.
    pub async fn recv_text_within(&mut self, ms: u64) -> Option<String> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next()).await;
            match next {
                Ok(Some(Ok(Message::Text(text)))) => return Some(text.as_str().to_string()),
                Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => continue,
                _ => return None,
            }
        }
    }

    pub async fn recv_text(&mut self) -> Result<String> {
        self.recv_text_within(SIGNAL_TIMEOUT_MS)
            .await
            .context("Timeout waiting for relayed frame")
    }

    pub async fn expect_silence(&mut self) -> bool {
        self.recv_text_within(SILENCE_MS).await.is_none()
    }

    /// Waits until the relay closes the socket.
    pub async fn closed_within(&mut self, ms: u64) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(ms);
        loop {
            match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Ok(None | Some(Err(_)) | Some(Ok(Message::Close(_)))) => return true,
                Ok(Some(Ok(_))) => continue,
                Err(_) => return false,
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await.context("Failed to close client")
    }
}
