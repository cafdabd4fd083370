mod handle_candidate_impl;
mod handle_description_impl;
mod handle_signal_impl;
mod link_event_impl;
mod negotiation_state;
mod negotiator;
mod pending_candidates;
mod session;
mod session_event;
mod start_impl;

pub use negotiation_state::*;
pub use negotiator::*;
pub use pending_candidates::*;
pub use session::*;
pub use session_event::*;
