mod relay_client;
mod signal_sink;

pub use relay_client::*;
pub use signal_sink::*;
