use crate::error::ProtocolError;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Pranswer,
    Answer,
    Rollback,
}

/// Session description as browsers serialize it: `{ "type": "offer", "sdp": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default, rename = "sdpMLineIndex")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

/// One signaling record on the wire. A record with none of `offer`, `answer`
/// and `iceCandidate` is a room announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    pub room_id: RoomId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<SessionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<SessionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_candidate: Option<IceCandidate>,
}

/// The single payload a well-formed [`SignalMessage`] carries.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalPayload {
    Announce,
    Offer(SessionDescription),
    Answer(SessionDescription),
    IceCandidate(IceCandidate),
}

impl SignalMessage {
    pub fn announce(room_id: RoomId) -> Self {
        Self {
            room_id,
            offer: None,
            answer: None,
            ice_candidate: None,
        }
    }

    pub fn offer(room_id: RoomId, offer: SessionDescription) -> Self {
        Self {
            offer: Some(offer),
            ..Self::announce(room_id)
        }
    }

    pub fn answer(room_id: RoomId, answer: SessionDescription) -> Self {
        Self {
            answer: Some(answer),
            ..Self::announce(room_id)
        }
    }

    pub fn ice_candidate(room_id: RoomId, candidate: IceCandidate) -> Self {
        Self {
            ice_candidate: Some(candidate),
            ..Self::announce(room_id)
        }
    }

    /// Parses a text frame, reporting routing problems before schema problems.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw)?;
        Envelope::from_value(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn kind(&self) -> MessageKind {
        match (&self.offer, &self.answer, &self.ice_candidate) {
            (None, None, None) => MessageKind::Announce,
            (Some(_), None, None) => MessageKind::Offer,
            (None, Some(_), None) => MessageKind::Answer,
            (None, None, Some(_)) => MessageKind::IceCandidate,
            _ => MessageKind::Mixed,
        }
    }

    pub fn into_payload(self) -> Result<SignalPayload, ProtocolError> {
        match (self.offer, self.answer, self.ice_candidate) {
            (None, None, None) => Ok(SignalPayload::Announce),
            (Some(offer), None, None) => Ok(SignalPayload::Offer(offer)),
            (None, Some(answer), None) => Ok(SignalPayload::Answer(answer)),
            (None, None, Some(candidate)) => Ok(SignalPayload::IceCandidate(candidate)),
            _ => Err(ProtocolError::AmbiguousPayload),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Announce,
    Offer,
    Answer,
    IceCandidate,
    Mixed,
}

impl MessageKind {
    fn of(fields: &Map<String, Value>) -> Self {
        let present = |key: &str| fields.get(key).is_some_and(|v| !v.is_null());

        match (present("offer"), present("answer"), present("iceCandidate")) {
            (false, false, false) => Self::Announce,
            (true, false, false) => Self::Offer,
            (false, true, false) => Self::Answer,
            (false, false, true) => Self::IceCandidate,
            _ => Self::Mixed,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Announce => "announce",
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
            Self::Mixed => "mixed",
        };
        f.write_str(name)
    }
}

/// Routing metadata the relay reads from a frame. The payload itself stays opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub room_id: RoomId,
    pub kind: MessageKind,
}

impl Envelope {
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, ProtocolError> {
        let Value::Object(fields) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let room_id = match fields.get("roomId") {
            None | Some(Value::Null) => return Err(ProtocolError::MissingRoomId),
            Some(Value::String(id)) => RoomId::new(id.as_str())?,
            Some(_) => return Err(ProtocolError::InvalidRoomId),
        };

        Ok(Self {
            room_id,
            kind: MessageKind::of(fields),
        })
    }
}
