//! Calculation lifecycle service.
//!
//! Implements the calculation driving ports on top of a
//! [`CalculationRepository`]. Create runs validate, compute, persist; update
//! runs fetch, merge, resolve, recompute, persist. Every failure is raised
//! before the store is written, so a rejected request leaves stored records
//! untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CalculationCommand, CalculationQuery, CalculationRepository, CreateCalculationRequest,
};
use crate::domain::{
    Calculation, CalculationChanges, CalculationError, CalculationId, CalculationPatch, Error,
    NewCalculation, OperationRegistry, Operands, UserId,
};

/// Calculation service implementing [`CalculationCommand`] and
/// [`CalculationQuery`].
#[derive(Clone)]
pub struct CalculationService<R> {
    repo: Arc<R>,
    registry: &'static OperationRegistry,
}

impl<R> CalculationService<R> {
    /// Create a service over `repo` using the process-wide registry.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            registry: OperationRegistry::global(),
        }
    }
}

impl<R> CalculationService<R>
where
    R: CalculationRepository,
{
    async fn create_calculation(
        &self,
        owner: &UserId,
        request: CreateCalculationRequest,
    ) -> Result<Calculation, CalculationError> {
        let inputs = Operands::try_from(request.inputs)?;
        let operation = self
            .registry
            .resolve(&request.operation_kind)
            .map_err(|err| CalculationError::UnknownOperation { kind: err.kind })?;
        let result = operation.apply(&inputs)?;

        let created = self
            .repo
            .create(NewCalculation {
                owner_id: *owner,
                operation_kind: operation.kind(),
                inputs,
                result,
            })
            .await?;
        debug!(
            calculation_id = %created.id,
            owner_id = %owner,
            operation = %created.operation_kind,
            "calculation created"
        );
        Ok(created)
    }

    async fn update_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
        changes: CalculationChanges,
    ) -> Result<Calculation, CalculationError> {
        let existing = self
            .repo
            .find(owner, id)
            .await?
            .ok_or(CalculationError::NotFound)?;
        if changes.is_empty() {
            return Ok(existing);
        }

        let provided_inputs = changes.inputs.map(Operands::try_from).transpose()?;
        let inputs = provided_inputs.unwrap_or(existing.inputs);
        let kind = changes
            .operation_kind
            .as_deref()
            .unwrap_or(existing.operation_kind.as_str());
        let operation = self
            .registry
            .resolve(kind)
            .map_err(|err| CalculationError::InvalidOperation { kind: err.kind })?;
        let result = operation.apply(&inputs)?;

        let patch = CalculationPatch {
            operation_kind: changes.operation_kind.is_some().then_some(operation.kind()),
            inputs: provided_inputs,
            result: Some(result),
        };
        let updated = self
            .repo
            .update(owner, id, patch, existing.revision)
            .await?
            .ok_or(CalculationError::NotFound)?;
        debug!(
            calculation_id = %id,
            revision = updated.revision,
            "calculation updated"
        );
        Ok(updated)
    }

    async fn delete_calculation(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<(), CalculationError> {
        if self.repo.delete(owner, id).await? {
            debug!(calculation_id = %id, "calculation deleted");
            Ok(())
        } else {
            Err(CalculationError::NotFound)
        }
    }
}

#[async_trait]
impl<R> CalculationCommand for CalculationService<R>
where
    R: CalculationRepository,
{
    async fn create(
        &self,
        owner: &UserId,
        request: CreateCalculationRequest,
    ) -> Result<Calculation, Error> {
        self.create_calculation(owner, request)
            .await
            .map_err(Error::from)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &CalculationId,
        changes: CalculationChanges,
    ) -> Result<Calculation, Error> {
        self.update_calculation(owner, id, changes)
            .await
            .map_err(Error::from)
    }

    async fn delete(&self, owner: &UserId, id: &CalculationId) -> Result<(), Error> {
        self.delete_calculation(owner, id)
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl<R> CalculationQuery for CalculationService<R>
where
    R: CalculationRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Calculation>, Error> {
        self.repo
            .list(owner)
            .await
            .map_err(|err| Error::from(CalculationError::from(err)))
    }

    async fn get(&self, owner: &UserId, id: &CalculationId) -> Result<Calculation, Error> {
        self.repo
            .find(owner, id)
            .await
            .map_err(CalculationError::from)
            .and_then(|found| found.ok_or(CalculationError::NotFound))
            .map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "calculation_service_tests.rs"]
mod tests;
