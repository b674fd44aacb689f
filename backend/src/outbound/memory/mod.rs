//! In-memory adapters used when no database is configured, and in tests.

mod account_repository;
mod calculation_repository;

pub use account_repository::InMemoryAccountRepository;
pub use calculation_repository::InMemoryCalculationRepository;
