//! HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};

use crate::outbound::persistence::DbPool;

/// Everything [`super::create_server`] needs besides the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database pool; repositories then use PostgreSQL instead of
    /// process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn has_database(&self) -> bool {
        self.db_pool.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_config_runs_without_a_database() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().expect("socket address");
        let config = ServerConfig::new(Key::generate(), true, SameSite::Strict, addr);
        assert_eq!(config.bind_addr(), addr);
        assert!(!config.has_database());
        assert!(config.cookie_secure);
        assert_eq!(config.same_site, SameSite::Strict);
    }
}
