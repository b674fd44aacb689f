//! Driving port for calculation mutations.
//!
//! HTTP handlers call [`CalculationCommand`] with the owner resolved from the
//! session. Implementations validate, compute and persist; they never accept a
//! result from the caller.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationChanges, CalculationId, Error, UserId};

/// Input for creating a calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCalculationRequest {
    /// Raw operation kind, resolved against the operation registry.
    pub operation_kind: String,
    /// Operands in order; must hold exactly two finite numbers.
    pub inputs: Vec<f64>,
}

/// Driving port for creating, editing and deleting calculations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationCommand: Send + Sync {
    /// Validate, compute and persist a new calculation.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error with `details.code` set to
    /// `invalid_input`, `unknown_operation`, `division_by_zero` or
    /// `non_finite_result`. Nothing is persisted on failure.
    async fn create(
        &self,
        owner: &UserId,
        request: CreateCalculationRequest,
    ) -> Result<Calculation, Error>;

    /// Merge `changes` into an owned calculation and recompute its result.
    ///
    /// # Errors
    ///
    /// Not-found for absent or foreign records, invalid-request for bad input,
    /// and conflict when another write committed first. The stored record is
    /// unchanged on any failure.
    async fn update(
        &self,
        owner: &UserId,
        id: &CalculationId,
        changes: CalculationChanges,
    ) -> Result<Calculation, Error>;

    /// Delete an owned calculation.
    async fn delete(&self, owner: &UserId, id: &CalculationId) -> Result<(), Error>;
}
