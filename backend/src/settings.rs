//! Server settings loaded via OrthoConfig.
//!
//! Values come from `CALC_*` environment variables, matching CLI flags, or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Process-level configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALC")]
pub struct CalcSettings {
    /// Socket the HTTP server listens on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; without it the server keeps records in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl CalcSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        Some(PoolConfig::new(url).with_max_size(self.pool_max_size))
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
