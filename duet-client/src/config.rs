use duet_core::RoomId;
use duet_core::utils::{DEFAULT_RELAY_URL, DEFAULT_STUN_ADDR};

/// Who sends the first offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Offer as soon as another member announces itself.
    #[default]
    Auto,
    /// Offer right after announcing.
    Initiator,
    /// Never offer, only answer.
    Responder,
}

#[derive(Debug, Clone)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub room_id: RoomId,
    pub role: Role,
    /// Acquire local media before answering if none is held yet.
    pub answer_with_media: bool,
}

impl SessionConfig {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            role: Role::default(),
            answer_with_media: true,
        }
    }
}

/// Settings for the webrtc-rs peer link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub ice_servers: Vec<IceServerConfig>,
    pub media: MediaConstraints,
    /// Media stream id announced for local tracks.
    pub stream_id: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![IceServerConfig::stun(DEFAULT_STUN_ADDR)],
            media: MediaConstraints::default(),
            stream_id: "duet".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub relay_url: String,
    pub session: SessionConfig,
    pub link: LinkConfig,
}

impl ClientConfig {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_owned(),
            session: SessionConfig::new(room_id),
            link: LinkConfig::default(),
        }
    }
}
