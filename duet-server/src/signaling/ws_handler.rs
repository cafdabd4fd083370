use crate::signaling::{Connection, RelayService};
use axum::extract::State;
use axum::extract::WebSocketUpgrade;
use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use axum::response::IntoResponse;
use bytes::Bytes;
use duet_core::ProtocolError;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: RelayService) {
    let shutdown = service.wait_for_shutdown();
    tokio::pin!(shutdown);

    if service.is_shutting_down() {
        return;
    }

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Utf8Bytes>(service.config().outbound_buffer);

    let mut connection = service.accept(tx);
    info!("New WebSocket connection: {}", connection.id());

    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
        let _ = sender.close().await;
    });

    loop {
        tokio::select! {
            msg = receiver.next() => match msg {
                Some(Ok(Message::Text(text))) => relay_frame(&service, &mut connection, text),
                Some(Ok(Message::Binary(data))) => match decode_binary(data) {
                    Ok(text) => relay_frame(&service, &mut connection, text),
                    Err(e) => warn!("Dropped frame from {}: {}", connection.id(), e),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("WebSocket error on {}: {}", connection.id(), e);
                    break;
                }
            },
            _ = &mut send_task => break,
            _ = &mut shutdown => break,
        }
    }

    let id = connection.id();
    service.disconnect(connection);
    send_task.abort();
    info!("WebSocket disconnected: {}", id);
}

fn relay_frame(service: &RelayService, connection: &mut Connection, frame: Utf8Bytes) {
    match service.handle_inbound(connection, frame) {
        Ok(delivery) => debug!(
            "Relayed {} from {} in '{}' to {} member(s)",
            delivery.kind,
            connection.id(),
            delivery.room_id,
            delivery.delivered
        ),
        Err(e) => warn!("Dropped frame from {}: {}", connection.id(), e),
    }
}

fn decode_binary(data: Bytes) -> Result<Utf8Bytes, ProtocolError> {
    String::from_utf8(data.to_vec())
        .map(Utf8Bytes::from)
        .map_err(|_| ProtocolError::NotUtf8)
}
