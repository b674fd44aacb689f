//! Port for calculation persistence.
//!
//! Every operation takes the owner's [`UserId`] and adapters must filter by it
//! in the same statement that touches the record, so a record owned by someone
//! else is indistinguishable from a missing one.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, CalculationPatch, NewCalculation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by calculation repository adapters.
    pub enum CalculationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "calculation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "calculation repository query failed: {message}",
        /// The record changed after it was read.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
    }
}

/// Port for calculation storage.
///
/// # Atomicity
///
/// Each call commits or rejects as a unit. Writes to one id are serialised;
/// writes to different ids may run in parallel.
///
/// # Revision Semantics
///
/// - [`create`](Self::create) stores revision 1.
/// - [`update`](Self::update) succeeds only when the stored revision equals
///   `expected_revision`, and stores `expected_revision + 1`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationRepository: Send + Sync {
    /// All calculations owned by `owner`, oldest first.
    async fn list(&self, owner: &UserId) -> Result<Vec<Calculation>, CalculationRepositoryError>;

    /// Fetch one calculation, or `None` when absent or owned by someone else.
    async fn find(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// Persist a new calculation, assigning its id and timestamps.
    async fn create(
        &self,
        calculation: NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError>;

    /// Apply `patch` to a stored calculation.
    ///
    /// Returns `None` when the record is absent or not owned by `owner`, and
    /// [`CalculationRepositoryError::RevisionMismatch`] when its revision is no
    /// longer `expected_revision`.
    async fn update(
        &self,
        owner: &UserId,
        id: &CalculationId,
        patch: CalculationPatch,
        expected_revision: u32,
    ) -> Result<Option<Calculation>, CalculationRepositoryError>;

    /// Remove a calculation. Returns `false` when nothing matched.
    async fn delete(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<bool, CalculationRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn revision_mismatch_names_both_revisions() {
        let message = CalculationRepositoryError::revision_mismatch(2_u32, 3_u32).to_string();
        assert!(message.contains("expected 2"));
        assert!(message.contains("found 3"));
    }

    #[rstest]
    fn connection_error_carries_message() {
        let err = CalculationRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "calculation repository connection failed: pool exhausted"
        );
    }
}
