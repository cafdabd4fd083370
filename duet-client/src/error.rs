use crate::engine::NegotiationState;
use duet_core::{ProtocolError, RoomId, SdpType};
use thiserror::Error;

/// The peer link refused a description or candidate.
#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("peer link error: {0}")]
    Link(#[from] webrtc::Error),

    #[error("peer link rejected the operation: {0}")]
    Rejected(String),

    #[error("unsupported session description type {0:?}")]
    UnsupportedDescription(SdpType),

    #[error("no peer link")]
    NoPeerLink,
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("local media unavailable: {0}")]
    Unavailable(String),

    #[error("neither audio nor video requested")]
    NothingRequested,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("message for room '{received}' ignored by session in room '{expected}'")]
    Routing { expected: RoomId, received: RoomId },

    #[error(transparent)]
    Negotiation(#[from] NegotiationError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: NegotiationState,
    },

    #[error("invalid transition {from} -> {to}")]
    InvalidTransition {
        from: NegotiationState,
        to: NegotiationState,
    },

    #[error("relay connection failed: {0}")]
    Relay(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("relay connection is closed")]
    RelayClosed,

    #[error("negotiation session has ended")]
    SessionEnded,
}
