//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`, `LoginService`, `AccountRegistration`) are
//! implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_registration;
mod account_repository;
mod calculation_command;
mod calculation_query;
mod calculation_repository;
mod login_service;

#[cfg(test)]
pub use account_registration::MockAccountRegistration;
pub use account_registration::AccountRegistration;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use calculation_command::MockCalculationCommand;
pub use calculation_command::{CalculationCommand, CreateCalculationRequest};
#[cfg(test)]
pub use calculation_query::MockCalculationQuery;
pub use calculation_query::CalculationQuery;
#[cfg(test)]
pub use calculation_repository::MockCalculationRepository;
pub use calculation_repository::{CalculationRepository, CalculationRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
