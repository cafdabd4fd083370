use crate::engine::{NegotiationSession, NegotiationState};
use crate::error::ClientError;
use crate::link::{MediaBackend, PeerLink};
use duet_core::SignalMessage;
use tracing::{info, warn};

impl<B: MediaBackend> NegotiationSession<B> {
    /// Acquires media, creates the link and sends the first offer.
    ///
    /// Media failure is reported before anything reaches the relay, and the session returns to
    /// `IDLE`.
    pub async fn start_as_initiator(&mut self) -> Result<(), ClientError> {
        self.expect_state("start as initiator", &[NegotiationState::Idle])?;
        self.transition(NegotiationState::GatheringLocal)?;

        if let Err(e) = self.prepare_offer().await {
            warn!("Could not start negotiation: {}", e);
            self.transition(NegotiationState::Idle)?;
            return Err(e);
        }

        self.transition(NegotiationState::OfferSent)
    }

    /// Sends a fresh offer over the existing link.
    pub async fn renegotiate(&mut self) -> Result<(), ClientError> {
        self.expect_state(
            "renegotiate",
            &[NegotiationState::Establishing, NegotiationState::Connected],
        )?;

        info!("Renegotiating in room '{}'", self.config.room_id);
        self.send_offer().await?;
        self.transition(NegotiationState::OfferSent)
    }

    async fn prepare_offer(&mut self) -> Result<(), ClientError> {
        if self.local_media.is_none() {
            self.acquire_local_media().await?;
        }
        self.ensure_link().await?;
        self.send_offer().await
    }

    async fn send_offer(&self) -> Result<(), ClientError> {
        let link = self.peer_link()?;
        let offer = link.create_offer().await?;
        link.set_local_description(offer.clone()).await?;

        info!("Sending OFFER to room '{}'", self.config.room_id);
        self.send(SignalMessage::offer(self.config.room_id.clone(), offer))
            .await
    }
}
