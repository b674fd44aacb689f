//! Driving port for creating accounts.

use async_trait::async_trait;

use crate::domain::{Account, Error, RegistrationForm};

/// Account-creation use case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistration: Send + Sync {
    /// Validate the form and persist a new account.
    ///
    /// # Errors
    ///
    /// Invalid-request with `details.code = "validation_failed"` listing every
    /// violation, or conflict with `details.code = "duplicate_account"`.
    async fn register(&self, form: RegistrationForm) -> Result<Account, Error>;
}
