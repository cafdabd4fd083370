use duet_core::utils::DEFAULT_RELAY_PORT;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Relay listener settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Frames a connection's writer may hold before further frames to it are skipped.
    pub outbound_buffer: usize,
}

impl RelayConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_RELAY_PORT,
            outbound_buffer: 64,
        }
    }
}
