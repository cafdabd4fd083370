mod config;
mod engine;
mod error;
mod link;
mod signaling;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use link::*;
pub use signaling::*;
