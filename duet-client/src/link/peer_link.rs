use crate::error::{MediaError, NegotiationError};
use async_trait::async_trait;
use duet_core::{IceCandidate, SessionDescription};
use tokio::sync::mpsc;

/// Connection state reported by the peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

/// Events a peer link raises on its own schedule.
#[derive(Debug)]
pub enum LinkEvent<R> {
    /// A local candidate was gathered and should go to the remote peer.
    LocalCandidate(IceCandidate),
    /// The remote side started sending a media stream.
    RemoteTrack { stream_id: String, media: R },
    StateChanged(LinkState),
}

pub type LinkEventSender<R> = mpsc::UnboundedSender<LinkEvent<R>>;

/// The direct media connection being negotiated.
#[async_trait]
pub trait PeerLink: Send + Sync + 'static {
    type LocalMedia: Send + Sync;

    async fn attach_local_media(&self, media: &Self::LocalMedia) -> Result<(), NegotiationError>;

    async fn create_offer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn set_local_description(&self, desc: SessionDescription)
    -> Result<(), NegotiationError>;

    async fn set_remote_description(
        &self,
        desc: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError>;

    async fn close(&self) -> Result<(), NegotiationError>;
}

/// Media capture and peer link construction, supplied by the embedding application.
#[async_trait]
pub trait MediaBackend: Send + Sync + 'static {
    /// Capture handle handed to the presentation layer.
    type LocalMedia: Clone + Send + Sync + 'static;
    /// Playback handle handed to the presentation layer.
    type RemoteMedia: Send + 'static;
    type Link: PeerLink<LocalMedia = Self::LocalMedia>;

    async fn acquire_local_media(&self) -> Result<Self::LocalMedia, MediaError>;

    /// Creates a link that reports candidates and remote tracks on `events`.
    async fn create_link(
        &self,
        events: LinkEventSender<Self::RemoteMedia>,
    ) -> Result<Self::Link, NegotiationError>;
}
