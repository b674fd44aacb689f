//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories used without a database and in tests.
//!
//! Adapters translate between domain types and storage representations; they
//! contain no business rules.

pub mod memory;
pub mod persistence;
