//! Account registration and login.
//!
//! [`AccountService`] implements both [`AccountRegistration`] and
//! [`LoginService`] over an [`AccountRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountRegistration, AccountRepository, AccountRepositoryError, LoginService,
};
use crate::domain::{
    Account, Error, LoginCredentials, PasswordDigest, RegistrationForm, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service implementing the registration and login driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    repo: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service with the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    fn map_repository_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::Duplicate { field } => {
                Error::conflict(format!("an account with this {field} already exists"))
                    .with_details(json!({
                        "code": "duplicate_account",
                        "field": field,
                    }))
            }
        }
    }
}

#[async_trait]
impl<R> AccountRegistration for AccountService<R>
where
    R: AccountRepository,
{
    async fn register(&self, form: RegistrationForm) -> Result<Account, Error> {
        let credentials = form.validate()?;
        let account = Account {
            id: UserId::random(),
            username: credentials.username().to_owned(),
            email: credentials.email().to_owned(),
            first_name: credentials.first_name().to_owned(),
            last_name: credentials.last_name().to_owned(),
            password_digest: PasswordDigest::derive(credentials.password()),
            created_at: Utc::now(),
        };
        self.repo
            .insert(&account)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %account.id, username = %account.username, "account registered");
        Ok(account)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: AccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let account = self
            .repo
            .find_by_username(credentials.username())
            .await
            .map_err(Self::map_repository_error)?;
        match account {
            Some(account) if account.password_digest.verify(credentials.password()) => {
                Ok(account.id)
            }
            _ => {
                debug!(username = credentials.username(), "login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}
