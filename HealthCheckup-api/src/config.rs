use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`, falling back to defaults on missing or bad values
    pub fn from_env() -> Self {
        Self::from_values(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn from_values(host: Option<String>, port: Option<String>) -> Self {
        let defaults = Self::default();

        let host = match host {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("Invalid HOST {:?}, using {}", value, defaults.host);
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match port {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("Invalid PORT {:?}, using {}", value, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
