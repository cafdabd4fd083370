use crate::engine::{NegotiationSession, NegotiationState, SessionEvent};
use crate::error::ClientError;
use crate::link::{LinkEvent, LinkState, MediaBackend};
use duet_core::SignalMessage;
use tracing::{debug, info, warn};

impl<B: MediaBackend> NegotiationSession<B> {
    /// Reacts to something the peer link reported on its own.
    pub async fn handle_link_event(
        &mut self,
        event: LinkEvent<B::RemoteMedia>,
    ) -> Result<(), ClientError> {
        if self.state.is_closed() {
            return Ok(());
        }

        match event {
            LinkEvent::LocalCandidate(candidate) => {
                debug!("Sending local ICE candidate: {}", candidate.candidate);
                self.send(SignalMessage::ice_candidate(
                    self.config.room_id.clone(),
                    candidate,
                ))
                .await
            }
            LinkEvent::RemoteTrack { stream_id, media } => {
                if self.remote_media_surfaced {
                    debug!("Remote stream {} already surfaced, ignoring track", stream_id);
                    return Ok(());
                }

                info!("Remote stream {} ready", stream_id);
                self.remote_media_surfaced = true;
                self.emit(SessionEvent::RemoteMediaReady(media));

                if self.state == NegotiationState::Establishing {
                    self.transition(NegotiationState::Connected)?;
                }
                Ok(())
            }
            LinkEvent::StateChanged(LinkState::Failed) => {
                warn!("Peer link failed in room '{}'", self.config.room_id);
                Ok(())
            }
            LinkEvent::StateChanged(state) => {
                info!("Peer link state: {:?}", state);
                Ok(())
            }
        }
    }
}
