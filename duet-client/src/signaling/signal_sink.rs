use crate::error::ClientError;
use async_trait::async_trait;
use duet_core::SignalMessage;

/// Outbound half of the signaling channel.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn send_signal(&self, message: SignalMessage) -> Result<(), ClientError>;
}
