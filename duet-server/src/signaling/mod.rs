mod connection;
mod relay_error;
mod relay_service;
mod ws_handler;

pub use connection::*;
pub use relay_error::*;
pub use relay_service::*;
pub use ws_handler::*;
