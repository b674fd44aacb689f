//! Failure taxonomy for the calculation lifecycle.
//!
//! [`CalculationError`] is what the service reasons about internally; it is
//! mapped onto the transport-agnostic [`Error`] envelope at the driving-port
//! boundary with a stable `details.code` for every variant clients can act on.

use serde_json::json;

use super::ports::CalculationRepositoryError;
use super::{ArithmeticError, Error, OperandsError};

/// Typed failures raised while creating, editing or deleting calculations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    /// No record with this id is visible to the requester.
    #[error("calculation not found")]
    NotFound,
    /// A create named a kind the registry does not know.
    #[error("unknown operation: {kind}")]
    UnknownOperation { kind: String },
    /// An update resolved to a kind the registry does not know.
    #[error("invalid operation: {kind}")]
    InvalidOperation { kind: String },
    /// Operands were not exactly two finite numbers.
    #[error("{message}")]
    InvalidInput { message: String },
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFiniteResult,
    /// Another write committed between read and update.
    #[error("calculation was modified concurrently; retry the update")]
    Conflict { expected: u32, actual: u32 },
    #[error(transparent)]
    Storage(CalculationRepositoryError),
}

impl CalculationError {
    /// Stable `details.code` for client-actionable variants.
    pub fn detail_code(&self) -> Option<&'static str> {
        match self {
            Self::UnknownOperation { .. } => Some("unknown_operation"),
            Self::InvalidOperation { .. } => Some("invalid_operation"),
            Self::InvalidInput { .. } => Some("invalid_input"),
            Self::DivisionByZero => Some("division_by_zero"),
            Self::NonFiniteResult => Some("non_finite_result"),
            Self::Conflict { .. } => Some("revision_mismatch"),
            Self::NotFound | Self::Storage(_) => None,
        }
    }
}

impl From<ArithmeticError> for CalculationError {
    fn from(value: ArithmeticError) -> Self {
        match value {
            ArithmeticError::DivisionByZero => Self::DivisionByZero,
            ArithmeticError::NonFiniteResult => Self::NonFiniteResult,
        }
    }
}

impl From<OperandsError> for CalculationError {
    fn from(value: OperandsError) -> Self {
        Self::InvalidInput {
            message: value.to_string(),
        }
    }
}

impl From<CalculationRepositoryError> for CalculationError {
    fn from(value: CalculationRepositoryError) -> Self {
        match value {
            CalculationRepositoryError::RevisionMismatch { expected, actual } => {
                Self::Conflict { expected, actual }
            }
            other => Self::Storage(other),
        }
    }
}

impl From<CalculationError> for Error {
    fn from(value: CalculationError) -> Self {
        let message = value.to_string();
        match &value {
            CalculationError::NotFound => Error::not_found(message),
            CalculationError::Storage(CalculationRepositoryError::Connection { message }) => {
                Error::service_unavailable(format!("calculation store unavailable: {message}"))
            }
            CalculationError::Storage(err) => {
                Error::internal(format!("calculation store error: {err}"))
            }
            CalculationError::UnknownOperation { kind }
            | CalculationError::InvalidOperation { kind } => Error::invalid_request(message)
                .with_details(json!({
                    "code": value.detail_code(),
                    "operationKind": kind,
                })),
            CalculationError::Conflict { expected, actual } => Error::conflict(message)
                .with_details(json!({
                    "code": value.detail_code(),
                    "expectedRevision": expected,
                    "actualRevision": actual,
                })),
            CalculationError::InvalidInput { .. }
            | CalculationError::DivisionByZero
            | CalculationError::NonFiniteResult => Error::invalid_request(message)
                .with_details(json!({ "code": value.detail_code() })),
        }
    }
}
