use crate::engine::NegotiationSession;
use crate::error::ClientError;
use crate::link::{MediaBackend, PeerLink};
use duet_core::IceCandidate;
use tracing::{debug, info};

impl<B: MediaBackend> NegotiationSession<B> {
    pub(super) async fn handle_remote_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), ClientError> {
        match (&self.link, self.remote_description_applied) {
            (Some(link), true) => {
                debug!("Adding ICE: {}", candidate.candidate);
                link.add_ice_candidate(candidate).await?;
            }
            _ => {
                info!("Remote description not set. Queuing ICE candidate");
                self.pending.push(candidate);
            }
        }
        Ok(())
    }
}
