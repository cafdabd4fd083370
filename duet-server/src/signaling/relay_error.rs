use duet_core::{ProtocolError, RoomId};
use thiserror::Error;

/// Why an inbound frame was dropped. None of these close the sender's connection.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("connection joined room '{joined}' but addressed room '{requested}'")]
    RoomMismatch { joined: RoomId, requested: RoomId },

    #[error("relay is shutting down")]
    ShuttingDown,
}
