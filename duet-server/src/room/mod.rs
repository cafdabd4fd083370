mod room;
mod room_member;
mod room_registry;

pub use room::*;
pub use room_member::*;
pub use room_registry::*;
