//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::Account;

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "account repository query failed: {message}",
        /// A unique column already holds the value.
        Duplicate { field: String } =>
            "an account with this {field} already exists",
    }
}

/// Port for storing and looking up accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// Fails with [`AccountRepositoryError::Duplicate`] naming `username` or
    /// `email` when either is already taken.
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Look up an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError>;
}
