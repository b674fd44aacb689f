//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories here only translate between Diesel rows and domain types.
//! Row structs and table definitions stay private to this module, and every
//! Diesel or pool error is mapped to the port's error type before it leaves.
//!
//! # Example
//!
//! ```ignore
//! use calculations::outbound::persistence::{DbPool, DieselCalculationRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/calculations")).await?;
//! let repo = DieselCalculationRepository::new(pool);
//! ```

mod diesel_account_repository;
mod diesel_basic_error_mapping;
mod diesel_calculation_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_calculation_repository::DieselCalculationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
