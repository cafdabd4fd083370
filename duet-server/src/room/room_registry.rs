use crate::room::{Room, RoomMember};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use duet_core::{ConnectionId, RoomId};
use std::sync::Arc;
use tracing::info;

/// Room id -> members.
///
/// Join and leave go through the map's entry API, so each holds the shard write lock for the
/// whole read-modify-write: two first joins to the same room cannot both create it, and a room
/// emptied by a leave is removed before anyone else can observe it. Broadcast copies the member
/// list out under a read lock and sends after the lock is released.
#[derive(Clone, Default)]
pub struct RoomRegistry {
    rooms: Arc<DashMap<RoomId, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the member was not in the room yet.
    pub fn join(&self, room_id: &RoomId, member: RoomMember) -> bool {
        let mut room = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating new room: {}", room_id);
            Room::default()
        });
        room.add(member)
    }

    /// Removes the connection and deletes the room if it is left empty.
    pub fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        let Entry::Occupied(mut entry) = self.rooms.entry(room_id.clone()) else {
            return false;
        };

        let removed = entry.get_mut().remove(connection_id);
        if entry.get().is_empty() {
            entry.remove();
            info!("Room '{}' is empty, removed", room_id);
        }
        removed
    }

    pub fn recipients(&self, room_id: &RoomId, sender: &ConnectionId) -> Vec<RoomMember> {
        self.rooms
            .get(room_id)
            .map(|room| room.recipients(sender))
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map(|room| room.len()).unwrap_or(0)
    }

    pub fn contains(&self, room_id: &RoomId, connection_id: &ConnectionId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|room| room.contains(connection_id))
    }
}
