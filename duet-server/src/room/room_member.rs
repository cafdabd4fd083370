use axum::extract::ws::Utf8Bytes;
use duet_core::ConnectionId;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// A connection as seen by the rooms it belongs to: its id and the writer queue of its socket.
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub connection_id: ConnectionId,
    outbound: mpsc::Sender<Utf8Bytes>,
}

impl RoomMember {
    pub fn new(connection_id: ConnectionId, outbound: mpsc::Sender<Utf8Bytes>) -> Self {
        Self {
            connection_id,
            outbound,
        }
    }

    /// Queues the frame only if the writer can take it right now.
    pub fn try_deliver(&self, frame: Utf8Bytes) -> Result<(), TrySendError<Utf8Bytes>> {
        self.outbound.try_send(frame)
    }
}
