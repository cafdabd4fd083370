use crate::engine::NegotiationState;
use crate::error::ClientError;
use tokio::sync::mpsc;

/// What a session reports to the presentation layer.
#[derive(Debug)]
pub enum SessionEvent<L, R> {
    /// Local capture is available.
    LocalMediaReady(L),
    /// Fired at most once per session.
    RemoteMediaReady(R),
    StateChanged(NegotiationState),
    /// A message or step failed. The session stays where it was.
    Error(ClientError),
}

pub type SessionEventSender<L, R> = mpsc::UnboundedSender<SessionEvent<L, R>>;
pub type SessionEventReceiver<L, R> = mpsc::UnboundedReceiver<SessionEvent<L, R>>;

/// Snapshot of a session, published after every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: NegotiationState,
    pub pending_candidates: usize,
    pub remote_media_surfaced: bool,
    pub has_peer_link: bool,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self {
            state: NegotiationState::Idle,
            pending_candidates: 0,
            remote_media_surfaced: false,
            has_peer_link: false,
        }
    }
}
