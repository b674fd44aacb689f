//! Per-user arithmetic calculations backend.
//!
//! Users register, log in with a session cookie and manage their own
//! calculation records. Results are always computed by the server.
//!
//! - [`domain`]: types, services and ports.
//! - [`inbound`]: HTTP adapter.
//! - [`outbound`]: PostgreSQL and in-memory repositories.
//! - [`server`]: application assembly.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
