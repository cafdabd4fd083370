use crate::config::SessionConfig;
use crate::engine::{
    NegotiationState, PendingCandidates, SessionEvent, SessionEventSender, SessionStatus,
};
use crate::error::{ClientError, NegotiationError};
use crate::link::{LinkEventSender, MediaBackend, PeerLink};
use crate::signaling::SignalSink;
use duet_core::{RoomId, SignalMessage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Client-side negotiation for one relay connection.
///
/// Every operation takes `&mut self`, so candidate arrival and remote description application
/// never interleave: the pending queue is drained in the same step that applies the description.
/// Link callbacks do not touch the session directly; they arrive as [`LinkEvent`]s on the channel
/// passed to [`NegotiationSession::new`] and are fed back through
/// [`NegotiationSession::handle_link_event`].
///
/// [`LinkEvent`]: crate::link::LinkEvent
pub struct NegotiationSession<B: MediaBackend> {
    pub(super) config: SessionConfig,
    pub(super) backend: Arc<B>,
    pub(super) signals: Arc<dyn SignalSink>,
    pub(super) link_events: LinkEventSender<B::RemoteMedia>,
    pub(super) events: SessionEventSender<B::LocalMedia, B::RemoteMedia>,
    pub(super) state: NegotiationState,
    pub(super) link: Option<B::Link>,
    pub(super) local_media: Option<B::LocalMedia>,
    pub(super) media_attached: bool,
    pub(super) pending: PendingCandidates,
    pub(super) remote_description_applied: bool,
    pub(super) remote_media_surfaced: bool,
}

impl<B: MediaBackend> NegotiationSession<B> {
    pub fn new(
        config: SessionConfig,
        backend: Arc<B>,
        signals: Arc<dyn SignalSink>,
        link_events: LinkEventSender<B::RemoteMedia>,
        events: SessionEventSender<B::LocalMedia, B::RemoteMedia>,
    ) -> Self {
        Self {
            config,
            backend,
            signals,
            link_events,
            events,
            state: NegotiationState::Idle,
            link: None,
            local_media: None,
            media_attached: false,
            pending: PendingCandidates::new(),
            remote_description_applied: false,
            remote_media_surfaced: false,
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn room_id(&self) -> &RoomId {
        &self.config.room_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending.len()
    }

    pub fn remote_media_surfaced(&self) -> bool {
        self.remote_media_surfaced
    }

    pub fn has_peer_link(&self) -> bool {
        self.link.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state,
            pending_candidates: self.pending.len(),
            remote_media_surfaced: self.remote_media_surfaced,
            has_peer_link: self.link.is_some(),
        }
    }

    /// Joins the room on the relay. Carries no payload and does not change state.
    pub async fn announce(&self) -> Result<(), ClientError> {
        info!("Announcing room '{}'", self.config.room_id);
        self.send(SignalMessage::announce(self.config.room_id.clone()))
            .await
    }

    /// Releases the peer link and local media and drops queued candidates. Idempotent.
    pub async fn close(&mut self) {
        if self.state.is_closed() {
            return;
        }

        if let Some(link) = self.link.take() {
            if let Err(e) = link.close().await {
                warn!("Failed to close peer link: {}", e);
            }
        }
        self.local_media = None;
        self.media_attached = false;

        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            debug!("Discarded {} queued ICE candidates", dropped);
        }
        self.remote_description_applied = false;

        self.enter(NegotiationState::Closed);
        info!("Negotiation in room '{}' closed", self.config.room_id);
    }

    pub(super) async fn send(&self, message: SignalMessage) -> Result<(), ClientError> {
        self.signals.send_signal(message).await
    }

    pub(super) fn peer_link(&self) -> Result<&B::Link, ClientError> {
        self.link
            .as_ref()
            .ok_or(ClientError::Negotiation(NegotiationError::NoPeerLink))
    }

    /// Acquires local capture and reports it to the presentation layer.
    pub(super) async fn acquire_local_media(&mut self) -> Result<(), ClientError> {
        let media = self.backend.acquire_local_media().await?;
        info!("Local media acquired");
        self.emit(SessionEvent::LocalMediaReady(media.clone()));
        self.local_media = Some(media);
        Ok(())
    }

    /// Creates the peer link on first use and attaches local media once it is held.
    pub(super) async fn ensure_link(&mut self) -> Result<(), ClientError> {
        if self.link.is_none() {
            let link = self.backend.create_link(self.link_events.clone()).await?;
            debug!("Peer link created for room '{}'", self.config.room_id);
            self.link = Some(link);
        }

        if !self.media_attached {
            if let (Some(link), Some(media)) = (&self.link, &self.local_media) {
                link.attach_local_media(media).await?;
                self.media_attached = true;
            }
        }
        Ok(())
    }

    /// Where the session rests once a remote description is in place.
    pub(super) fn settled_state(&self) -> NegotiationState {
        if self.remote_media_surfaced {
            NegotiationState::Connected
        } else {
            NegotiationState::Establishing
        }
    }

    pub(super) fn transition(&mut self, next: NegotiationState) -> Result<(), ClientError> {
        if !self.state.can_transition_to(next) {
            return Err(ClientError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.enter(next);
        Ok(())
    }

    pub(super) fn expect_state(
        &self,
        operation: &'static str,
        allowed: &[NegotiationState],
    ) -> Result<(), ClientError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ClientError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    pub(super) fn emit(&self, event: SessionEvent<B::LocalMedia, B::RemoteMedia>) {
        let _ = self.events.send(event);
    }

    fn enter(&mut self, next: NegotiationState) {
        if self.state == next {
            return;
        }
        debug!("Negotiation state {} -> {}", self.state, next);
        self.state = next;
        self.emit(SessionEvent::StateChanged(next));
    }
}
