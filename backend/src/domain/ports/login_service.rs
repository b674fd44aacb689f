//! Driving port for login.
//!
//! Inbound adapters authenticate through this trait without importing the
//! account store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords produce the same unauthorised
    /// error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}
