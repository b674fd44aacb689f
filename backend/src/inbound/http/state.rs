//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountRegistration, CalculationCommand, CalculationQuery, LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountRegistration>,
    pub calculations: Arc<dyn CalculationCommand>,
    pub calculations_query: Arc<dyn CalculationQuery>,
}

impl HttpState {
    /// Bundle port implementations for the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use calculations::domain::{AccountService, CalculationService};
    /// use calculations::inbound::http::state::HttpState;
    /// use calculations::outbound::memory::{
    ///     InMemoryAccountRepository, InMemoryCalculationRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let accounts = Arc::new(AccountService::new(Arc::new(InMemoryAccountRepository::default())));
    /// let calculations = Arc::new(CalculationService::new(Arc::new(
    ///     InMemoryCalculationRepository::new(Arc::new(DefaultClock)),
    /// )));
    /// let state = HttpState::new(
    ///     accounts.clone(),
    ///     accounts,
    ///     calculations.clone(),
    ///     calculations,
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        accounts: Arc<dyn AccountRegistration>,
        calculations: Arc<dyn CalculationCommand>,
        calculations_query: Arc<dyn CalculationQuery>,
    ) -> Self {
        Self {
            login,
            accounts,
            calculations,
            calculations_query,
        }
    }
}
