use crate::config::Role;
use crate::engine::{NegotiationSession, NegotiationState};
use crate::error::ClientError;
use crate::link::MediaBackend;
use duet_core::{SignalMessage, SignalPayload};
use tracing::{debug, info};

impl<B: MediaBackend> NegotiationSession<B> {
    /// Applies one relayed text frame.
    ///
    /// Frames that fail to parse or name another room return an error and leave the session
    /// untouched. Frames arriving after close are ignored.
    pub async fn handle_signal(&mut self, raw: &str) -> Result<(), ClientError> {
        if self.state.is_closed() {
            debug!("Session closed, ignoring signal");
            return Ok(());
        }

        let message = SignalMessage::parse(raw)?;
        if message.room_id != self.config.room_id {
            return Err(ClientError::Routing {
                expected: self.config.room_id.clone(),
                received: message.room_id,
            });
        }

        match message.into_payload()? {
            SignalPayload::Announce => self.handle_announce().await,
            SignalPayload::Offer(offer) => self.handle_remote_offer(offer).await,
            SignalPayload::Answer(answer) => self.handle_remote_answer(answer).await,
            SignalPayload::IceCandidate(candidate) => {
                self.handle_remote_candidate(candidate).await
            }
        }
    }

    /// An announcement means someone joined the room. `Auto` in `IDLE` calls them. A session that
    /// has already negotiated calls again, since its previous peer has left and the newcomer
    /// waits in `IDLE` for an offer.
    async fn handle_announce(&mut self) -> Result<(), ClientError> {
        match (self.config.role, self.state) {
            (Role::Auto, NegotiationState::Idle) => {
                info!(
                    "Peer joined room '{}'. Initiating connection...",
                    self.config.room_id
                );
                self.start_as_initiator().await
            }
            (Role::Auto | Role::Initiator, state) if state.is_negotiated() => {
                info!(
                    "Peer rejoined room '{}'. Renegotiating...",
                    self.config.room_id
                );
                self.renegotiate().await
            }
            _ => {
                debug!("Peer announced in room '{}'", self.config.room_id);
                Ok(())
            }
        }
    }
}
