use async_trait::async_trait;
use duet_client::{ClientError, SignalSink};
use duet_core::{MessageKind, SignalMessage};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// SignalSink that records every outgoing message instead of sending it.
#[derive(Clone, Default)]
pub struct MockSignalSink {
    sent: Arc<Mutex<Vec<SignalMessage>>>,
    failures: Arc<AtomicUsize>,
}

impl MockSignalSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `count` sends fail as if the relay had gone away. Failed sends are not recorded.
    pub fn fail_next_sends(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    pub async fn sent(&self) -> Vec<SignalMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn kinds(&self) -> Vec<MessageKind> {
        self.sent.lock().await.iter().map(|m| m.kind()).collect()
    }

    /// SDP of every offer sent, in order.
    pub async fn offers(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|m| m.offer.as_ref().map(|d| d.sdp.clone()))
            .collect()
    }

    pub async fn answers(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|m| m.answer.as_ref().map(|d| d.sdp.clone()))
            .collect()
    }

    pub async fn candidates(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|m| m.ice_candidate.as_ref().map(|c| c.candidate.clone()))
            .collect()
    }
}

#[async_trait]
impl SignalSink for MockSignalSink {
    async fn send_signal(&self, message: SignalMessage) -> Result<(), ClientError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ClientError::RelayClosed);
        }
        self.sent.lock().await.push(message);
        Ok(())
    }
}
