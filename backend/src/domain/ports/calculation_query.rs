//! Driving port for reading calculations.

use async_trait::async_trait;

use crate::domain::{Calculation, CalculationId, Error, UserId};

/// Owner-scoped reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationQuery: Send + Sync {
    /// Every calculation owned by `owner`, in creation order.
    async fn list(&self, owner: &UserId) -> Result<Vec<Calculation>, Error>;

    /// One owned calculation; not-found when absent or owned by someone else.
    async fn get(&self, owner: &UserId, id: &CalculationId) -> Result<Calculation, Error>;
}
