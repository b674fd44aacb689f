//! Builders wiring driving ports to their repositories.
//!
//! With a database pool every port is backed by Diesel; without one the
//! services run over in-memory repositories so the server stays usable for
//! local development and tests.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use crate::domain::ports::{
    AccountRegistration, AccountRepository, CalculationCommand, CalculationQuery,
    CalculationRepository, LoginService,
};
use crate::domain::{AccountService, CalculationService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryAccountRepository, InMemoryCalculationRepository};
use crate::outbound::persistence::{DbPool, DieselAccountRepository, DieselCalculationRepository};

use super::ServerConfig;

type CalculationPorts = (Arc<dyn CalculationCommand>, Arc<dyn CalculationQuery>);
type AccountPorts = (Arc<dyn LoginService>, Arc<dyn AccountRegistration>);

fn calculation_ports<R>(repo: R) -> CalculationPorts
where
    R: CalculationRepository + 'static,
{
    let service = Arc::new(CalculationService::new(Arc::new(repo)));
    (service.clone(), service)
}

fn account_ports<R>(repo: R) -> AccountPorts
where
    R: AccountRepository + 'static,
{
    let service = Arc::new(AccountService::new(Arc::new(repo)));
    (service.clone(), service)
}

fn build_ports(pool: Option<&DbPool>) -> (AccountPorts, CalculationPorts) {
    match pool {
        Some(pool) => (
            account_ports(DieselAccountRepository::new(pool.clone())),
            calculation_ports(DieselCalculationRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; records are kept in memory");
            (
                account_ports(InMemoryAccountRepository::default()),
                calculation_ports(InMemoryCalculationRepository::new(Arc::new(DefaultClock))),
            )
        }
    }
}

/// Build the HTTP state for `config`.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(in_memory_or_pooled(config.db_pool.as_ref()))
}

/// Build HTTP state over in-memory repositories.
///
/// # Examples
/// ```
/// use calculations::server::in_memory_http_state;
///
/// let state = in_memory_http_state();
/// let _calculations = state.calculations.clone();
/// ```
pub fn in_memory_http_state() -> HttpState {
    in_memory_or_pooled(None)
}

fn in_memory_or_pooled(pool: Option<&DbPool>) -> HttpState {
    let ((login, accounts), (calculations, calculations_query)) = build_ports(pool);
    HttpState::new(login, accounts, calculations, calculations_query)
}
