use std::fmt;

/// Where a negotiation session is resting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NegotiationState {
    Idle,
    /// Local media or the local description is being prepared.
    GatheringLocal,
    OfferSent,
    /// An offer arrived and the answer is being prepared.
    AwaitingRemote,
    /// Remote description applied, candidates flowing.
    Establishing,
    /// A remote media stream has been surfaced.
    Connected,
    Closed,
}

impl NegotiationState {
    pub fn can_transition_to(self, next: NegotiationState) -> bool {
        use NegotiationState::*;

        match (self, next) {
            (Closed, _) => false,
            (_, Closed) => true,
            (Idle, GatheringLocal | AwaitingRemote) => true,
            (GatheringLocal, OfferSent | AwaitingRemote | Idle) => true,
            (OfferSent, Establishing | Connected) => true,
            (AwaitingRemote, Establishing | Connected) => true,
            (Establishing, Establishing | Connected | OfferSent) => true,
            (Connected, Connected | OfferSent) => true,
            _ => false,
        }
    }

    pub fn is_closed(self) -> bool {
        self == NegotiationState::Closed
    }

    /// A remote description has been applied at least once.
    pub fn is_negotiated(self) -> bool {
        matches!(
            self,
            NegotiationState::Establishing | NegotiationState::Connected
        )
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::GatheringLocal => "GATHERING_LOCAL",
            Self::OfferSent => "OFFER_SENT",
            Self::AwaitingRemote => "AWAITING_REMOTE",
            Self::Establishing => "ESTABLISHING",
            Self::Connected => "CONNECTED",
            Self::Closed => "CLOSED",
        };
        f.write_str(name)
    }
}
