//! In-process account store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Account;
use crate::domain::ports::{AccountRepository, AccountRepositoryError};

/// Account repository held in process memory, keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AccountRepositoryError::query("account store lock poisoned"))?;
        if accounts.contains_key(&account.username) {
            return Err(AccountRepositoryError::duplicate("username"));
        }
        if accounts.values().any(|existing| existing.email == account.email) {
            return Err(AccountRepositoryError::duplicate("email"));
        }
        accounts.insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| AccountRepositoryError::query("account store lock poisoned"))?;
        Ok(accounts.get(username).cloned())
    }
}
