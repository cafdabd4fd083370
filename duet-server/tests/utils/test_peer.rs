use axum::extract::ws::Utf8Bytes;
use duet_server::{Connection, Delivery, RelayError, RelayService};
use tokio::sync::mpsc;

/// A relay connection driven directly, without a socket.
pub struct TestPeer {
    pub connection: Connection,
    rx: mpsc::Receiver<Utf8Bytes>,
}

impl TestPeer {
    pub fn connect(service: &RelayService) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            connection: service.accept(tx),
            rx,
        }
    }

    pub fn send(&mut self, service: &RelayService, raw: &str) -> Result<Delivery, RelayError> {
        service.handle_inbound(&mut self.connection, Utf8Bytes::from(raw.to_string()))
    }

    /// Everything delivered to this peer so far.
    pub fn received(&mut self) -> Vec<String> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(frame.as_str().to_string());
        }
        frames
    }
}
