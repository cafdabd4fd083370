use crate::engine::{NegotiationSession, NegotiationState, SessionEvent};
use crate::error::{ClientError, NegotiationError};
use crate::link::{MediaBackend, PeerLink};
use duet_core::{SessionDescription, SignalMessage};
use tracing::{debug, info, warn};

impl<B: MediaBackend> NegotiationSession<B> {
    pub(super) async fn handle_remote_offer(
        &mut self,
        offer: SessionDescription,
    ) -> Result<(), ClientError> {
        info!("Received OFFER in room '{}'", self.config.room_id);

        if self.state == NegotiationState::Idle {
            if self.config.answer_with_media && self.local_media.is_none() {
                self.transition(NegotiationState::GatheringLocal)?;
                if let Err(e) = self.acquire_local_media().await {
                    self.transition(NegotiationState::Idle)?;
                    return Err(e);
                }
            }
            self.transition(NegotiationState::AwaitingRemote)?;
        }

        self.ensure_link().await?;
        self.apply_remote_description(offer).await?;

        let link = self.peer_link()?;
        let answer = link.create_answer().await?;
        link.set_local_description(answer.clone()).await?;

        info!("Sending ANSWER to room '{}'", self.config.room_id);
        self.send(SignalMessage::answer(self.config.room_id.clone(), answer))
            .await?;

        self.transition(self.settled_state())
    }

    pub(super) async fn handle_remote_answer(
        &mut self,
        answer: SessionDescription,
    ) -> Result<(), ClientError> {
        self.expect_state("apply an answer", &[NegotiationState::OfferSent])?;
        info!("Received ANSWER in room '{}'", self.config.room_id);

        self.apply_remote_description(answer).await?;
        self.transition(self.settled_state())
    }

    /// Sets the remote description and, in the same step, applies every queued candidate in
    /// arrival order. The queue is emptied before the first candidate is applied, so none can be
    /// applied twice.
    async fn apply_remote_description(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), ClientError> {
        let link = self
            .link
            .as_ref()
            .ok_or(ClientError::Negotiation(NegotiationError::NoPeerLink))?;

        link.set_remote_description(desc).await?;
        self.remote_description_applied = true;

        let queued = self.pending.take_all();
        if !queued.is_empty() {
            debug!("Applying {} queued ICE candidates", queued.len());
        }

        for candidate in queued {
            if let Err(e) = link.add_ice_candidate(candidate).await {
                warn!("Error adding queued ICE: {}", e);
                self.emit(SessionEvent::Error(e.into()));
            }
        }
        Ok(())
    }
}
