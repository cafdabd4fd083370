use crate::room::RoomMember;
use duet_core::ConnectionId;

/// Members of one room, kept in join order.
#[derive(Debug, Default)]
pub struct Room {
    members: Vec<RoomMember>,
}

impl Room {
    /// Returns `false` if the connection is already a member.
    pub fn add(&mut self, member: RoomMember) -> bool {
        if self.contains(&member.connection_id) {
            return false;
        }
        self.members.push(member);
        true
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.connection_id != connection_id);
        self.members.len() != before
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.members.iter().any(|m| &m.connection_id == connection_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Everyone except `sender`, in join order.
    pub fn recipients(&self, sender: &ConnectionId) -> Vec<RoomMember> {
        self.members
            .iter()
            .filter(|m| &m.connection_id != sender)
            .cloned()
            .collect()
    }
}
