use std::net::SocketAddr;

use parley_core::DEFAULT_PORT;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr, // e.g. "0.0.0.0:12345"
}

impl Config {
    /// Resolves the listen address from the optional CLI port.
    pub fn from_port(port: Option<u16>) -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(DEFAULT_PORT))),
        }
    }
}
