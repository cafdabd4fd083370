mod peer_link;
mod webrtc_link;

pub use peer_link::*;
pub use webrtc_link::*;
