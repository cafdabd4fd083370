use crate::config::RelayConfig;
use crate::room::RoomRegistry;
use crate::signaling::{Connection, RelayError};
use axum::extract::ws::Utf8Bytes;
use duet_core::{ConnectionId, Envelope, MessageKind, RoomId};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

struct RelayInner {
    registry: RoomRegistry,
    config: RelayConfig,
    shutdown: watch::Sender<bool>,
}

/// What happened to one relayed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub room_id: RoomId,
    pub kind: MessageKind,
    /// The sender was added to the room by this frame.
    pub joined: bool,
    pub delivered: usize,
    /// Recipients whose writer was closed or full.
    pub skipped: usize,
}

#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl RelayService {
    pub fn new(config: RelayConfig) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            inner: Arc::new(RelayInner {
                registry: RoomRegistry::new(),
                config,
                shutdown,
            }),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.inner.registry
    }

    /// Registers a socket. It belongs to no room until its first routable message.
    pub fn accept(&self, outbound: mpsc::Sender<Utf8Bytes>) -> Connection {
        let connection = Connection::new(outbound);
        debug!("Accepted connection {}", connection.id());
        connection
    }

    /// Joins the sender to the frame's room if needed, then forwards the frame verbatim to every
    /// other member whose writer can take it.
    pub fn handle_inbound(
        &self,
        connection: &mut Connection,
        frame: Utf8Bytes,
    ) -> Result<Delivery, RelayError> {
        if self.is_shutting_down() {
            return Err(RelayError::ShuttingDown);
        }

        let envelope = Envelope::parse(frame.as_str())?;

        if let Some(bound) = connection.room() {
            if *bound != envelope.room_id {
                return Err(RelayError::RoomMismatch {
                    joined: bound.clone(),
                    requested: envelope.room_id,
                });
            }
        }

        let registry = &self.inner.registry;
        let joined = registry.join(&envelope.room_id, connection.as_member());
        if joined {
            info!("Connection {} joined room '{}'", connection.id(), envelope.room_id);
        }
        connection.bind_room(envelope.room_id.clone());

        let mut delivered = 0;
        let mut skipped = 0;
        for member in registry.recipients(&envelope.room_id, &connection.id()) {
            match member.try_deliver(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    skipped += 1;
                    debug!(
                        "Frame for {} not delivered ({}): {}",
                        member.connection_id, envelope.kind, e
                    );
                }
            }
        }

        Ok(Delivery {
            room_id: envelope.room_id,
            kind: envelope.kind,
            joined,
            delivered,
            skipped,
        })
    }

    /// Drops the connection from its room. Safe for connections that never announced one.
    pub fn disconnect(&self, mut connection: Connection) {
        if let Some(room_id) = connection.take_room() {
            self.inner.registry.leave(&room_id, &connection.id());
        }
        info!("Client {} disconnected, cleaned up rooms.", connection.id());
    }

    pub fn is_member(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        self.inner.registry.contains(room_id, connection_id)
    }

    /// Tells every live socket handler to close.
    pub fn shutdown(&self) {
        self.inner.shutdown.send_replace(true);
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.inner.shutdown.borrow()
    }

    /// Resolves once shutdown has been requested, including when that happened before the call.
    pub async fn wait_for_shutdown(&self) {
        let mut shutdown = self.inner.shutdown.subscribe();
        let _ = shutdown.wait_for(|requested| *requested).await;
    }
}
