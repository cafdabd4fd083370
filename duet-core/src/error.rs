use thiserror::Error;

/// A signaling payload that cannot be routed or interpreted.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload is not valid UTF-8")]
    NotUtf8,

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("roomId is required")]
    MissingRoomId,

    #[error("roomId must not be empty")]
    EmptyRoomId,

    #[error("roomId must be a string")]
    InvalidRoomId,

    #[error("message carries more than one of offer, answer and iceCandidate")]
    AmbiguousPayload,
}
