//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GYM_BUDDY_*` environment variables, or a
//! configuration file. The port and pool size carry declared defaults so an
//! empty environment still loads; the host falls back to every interface.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Configuration controlling the HTTP listener and storage backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GYM_BUDDY")]
pub struct ServerSettings {
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    /// Socket address assembled from `host` and `port`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host.unwrap_or(DEFAULT_HOST), self.port)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
