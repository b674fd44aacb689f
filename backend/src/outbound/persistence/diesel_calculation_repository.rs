//! PostgreSQL-backed `CalculationRepository` using Diesel.
//!
//! Every statement filters on `user_id` alongside `id`. Updates are a single
//! `UPDATE ... WHERE revision = $expected RETURNING *`, so the row lock taken
//! by PostgreSQL serialises writers to one id and the loser of a race sees
//! zero rows.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{
    Calculation, CalculationId, CalculationPatch, NewCalculation, OperationKind, Operands, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CalculationChangeset, CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Diesel-backed implementation of the `CalculationRepository` port.
#[derive(Clone)]
pub struct DieselCalculationRepository {
    pool: DbPool,
}

impl DieselCalculationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CalculationRepositoryError {
    map_basic_pool_error(error, CalculationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CalculationRepositoryError {
    map_basic_diesel_error(
        error,
        CalculationRepositoryError::query,
        CalculationRepositoryError::connection,
    )
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "revisions stay far below i32::MAX"
)]
fn revision_to_db(revision: u32) -> i32 {
    revision as i32
}

fn revision_from_db(revision: i32) -> Result<u32, CalculationRepositoryError> {
    u32::try_from(revision)
        .map_err(|_| CalculationRepositoryError::query("stored revision is negative"))
}

/// Convert a row to a domain calculation, rejecting rows that break invariants.
fn row_to_calculation(row: CalculationRow) -> Result<Calculation, CalculationRepositoryError> {
    let operation_kind: OperationKind = row
        .operation
        .parse()
        .map_err(|_| CalculationRepositoryError::query("stored operation kind is not recognised"))?;
    let inputs = Operands::try_from(row.inputs)
        .map_err(|_| CalculationRepositoryError::query("stored inputs are not two finite numbers"))?;
    Ok(Calculation {
        id: CalculationId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.user_id),
        operation_kind,
        inputs,
        result: row.result,
        revision: revision_from_db(row.revision)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn changeset(patch: &CalculationPatch, next_revision: u32) -> CalculationChangeset<'static> {
    CalculationChangeset {
        operation: patch.operation_kind.map(|kind| kind.as_str()),
        inputs: patch.inputs.map(|inputs| inputs.to_vec()),
        result: patch.result,
        revision: revision_to_db(next_revision),
        updated_at: Utc::now(),
    }
}

async fn find_row<C>(
    conn: &mut C,
    owner: Uuid,
    id: Uuid,
) -> Result<Option<CalculationRow>, CalculationRepositoryError>
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    calculations::table
        .filter(calculations::id.eq(id))
        .filter(calculations::user_id.eq(owner))
        .select(CalculationRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_diesel_error)
}

#[async_trait]
impl CalculationRepository for DieselCalculationRepository {
    async fn list(&self, owner: &UserId) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CalculationRow> = calculations::table
            .filter(calculations::user_id.eq(owner.as_uuid()))
            .order(calculations::seq.asc())
            .select(CalculationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_calculation).collect()
    }

    async fn find(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        find_row(&mut conn, *owner.as_uuid(), *id.as_uuid())
            .await?
            .map(row_to_calculation)
            .transpose()
    }

    async fn create(
        &self,
        calculation: NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewCalculationRow {
            id: Uuid::new_v4(),
            user_id: *calculation.owner_id.as_uuid(),
            operation: calculation.operation_kind.as_str(),
            inputs: calculation.inputs.to_vec(),
            result: calculation.result,
        };
        let stored: CalculationRow = diesel::insert_into(calculations::table)
            .values(&row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_calculation(stored)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &CalculationId,
        patch: CalculationPatch,
        expected_revision: u32,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner_uuid = *owner.as_uuid();
        let id_uuid = *id.as_uuid();

        let updated: Option<CalculationRow> = diesel::update(
            calculations::table
                .filter(calculations::id.eq(id_uuid))
                .filter(calculations::user_id.eq(owner_uuid))
                .filter(calculations::revision.eq(revision_to_db(expected_revision))),
        )
        .set(changeset(&patch, expected_revision + 1))
        .returning(CalculationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return row_to_calculation(row).map(Some);
        }

        // Zero rows: either the record is gone or its revision moved on.
        match find_row(&mut conn, owner_uuid, id_uuid).await? {
            Some(current) => Err(CalculationRepositoryError::revision_mismatch(
                expected_revision,
                revision_from_db(current.revision)?,
            )),
            None => Ok(None),
        }
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<bool, CalculationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            calculations::table
                .filter(calculations::id.eq(id.as_uuid()))
                .filter(calculations::user_id.eq(owner.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
