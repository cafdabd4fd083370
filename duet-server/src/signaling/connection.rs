use crate::room::RoomMember;
use axum::extract::ws::Utf8Bytes;
use duet_core::{ConnectionId, RoomId};
use tokio::sync::mpsc;

/// Relay-side state of one participant socket.
///
/// The room is fixed by the first routable message and never changes afterwards.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    outbound: mpsc::Sender<Utf8Bytes>,
    room: Option<RoomId>,
}

impl Connection {
    pub(crate) fn new(outbound: mpsc::Sender<Utf8Bytes>) -> Self {
        Self {
            id: ConnectionId::new(),
            outbound,
            room: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn room(&self) -> Option<&RoomId> {
        self.room.as_ref()
    }

    pub fn is_open(&self) -> bool {
        !self.outbound.is_closed()
    }

    pub(crate) fn bind_room(&mut self, room_id: RoomId) {
        if self.room.is_none() {
            self.room = Some(room_id);
        }
    }

    pub(crate) fn take_room(&mut self) -> Option<RoomId> {
        self.room.take()
    }

    pub(crate) fn as_member(&self) -> RoomMember {
        RoomMember::new(self.id, self.outbound.clone())
    }
}
