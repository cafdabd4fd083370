use crate::error::ClientError;
use crate::signaling::SignalSink;
use async_trait::async_trait;
use duet_core::SignalMessage;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

const INBOUND_BUFFER: usize = 64;

/// WebSocket connection to the signaling relay.
///
/// Outgoing messages are queued to a writer task, which closes the socket once the client is
/// dropped. Inbound text frames are handed out on the receiver returned by
/// [`RelayClient::connect`], which ends when the relay closes the socket.
pub struct RelayClient {
    tx: mpsc::UnboundedSender<Message>,
}

impl RelayClient {
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<String>), ClientError> {
        info!("Connecting to signaling relay: {}", url);

        let (ws_stream, _) = connect_async(url).await?;
        info!("Connected to signaling relay");

        let (write, read) = ws_stream.split();
        let (tx, rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_BUFFER);

        tokio::spawn(Self::sender_task(write, rx));
        tokio::spawn(Self::receiver_task(read, inbound_tx));

        Ok((Self { tx }, inbound_rx))
    }

    async fn sender_task(
        mut write: SplitSink<WsStream, Message>,
        mut rx: mpsc::UnboundedReceiver<Message>,
    ) {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = write.send(msg).await {
                error!("Failed to send WebSocket message: {}", e);
                break;
            }
        }

        let _ = write.close().await;
        debug!("Sender task terminated");
    }

    async fn receiver_task(mut read: SplitStream<WsStream>, inbound: mpsc::Sender<String>) {
        while let Some(msg_result) = read.next().await {
            let text = match msg_result {
                Ok(Message::Text(text)) => text.as_str().to_owned(),
                Ok(Message::Binary(data)) => match String::from_utf8(data.to_vec()) {
                    Ok(text) => text,
                    Err(_) => {
                        warn!("Dropped binary frame that is not UTF-8");
                        continue;
                    }
                },
                Ok(Message::Close(_)) => {
                    info!("WebSocket connection closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => continue,
            };

            if inbound.send(text).await.is_err() {
                break;
            }
        }

        debug!("Receiver task terminated");
    }
}

#[async_trait]
impl SignalSink for RelayClient {
    async fn send_signal(&self, message: SignalMessage) -> Result<(), ClientError> {
        let json = message.to_json()?;
        debug!("Sending {} to relay", message.kind());
        self.tx
            .send(Message::text(json))
            .map_err(|_| ClientError::RelayClosed)
    }
}
