//! Domain primitives, services and ports.
//!
//! Purpose: hold the calculation lifecycle and account rules independent of
//! HTTP and storage. Inbound adapters call the driving ports in [`ports`];
//! outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - OperationRegistry / OperationKind: the closed set of arithmetic kinds.
//! - Calculation and its value types; CalculationService.
//! - RegistrationForm / ValidatedCredentials: credential validation.
//! - Account / AccountService: registration and login.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod calculation;
pub mod calculation_error;
pub mod calculation_service;
pub mod credentials;
pub mod error;
pub mod operation;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account::{Account, MalformedDigest, PasswordDigest};
pub use self::account_service::AccountService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::calculation::{
    Calculation, CalculationChanges, CalculationId, CalculationPatch, NewCalculation, Operands,
    OperandsError,
};
pub use self::calculation_error::CalculationError;
pub use self::calculation_service::CalculationService;
pub use self::credentials::{
    CredentialField, CredentialViolation, CredentialViolations, RegistrationForm,
    ValidatedCredentials, ViolationCode,
};
pub use self::error::{Error, ErrorCode};
pub use self::operation::{
    ArithmeticError, BinaryOperation, OperationKind, OperationRegistry, ResolvedOperation,
    UnknownOperation,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use calculations::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
