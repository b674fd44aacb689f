//! In-process calculation store.
//!
//! Records live behind their own mutex so writes to one id serialise while
//! different ids proceed in parallel. The map lock is only held long enough to
//! clone a record handle, never while a record lock is being acquired for a
//! write.
//!
//! Deletion marks the record as a tombstone before unlinking it from the map,
//! so a writer that already holds the handle sees the deletion and reports the
//! record as missing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{CalculationRepository, CalculationRepositoryError};
use crate::domain::{Calculation, CalculationId, CalculationPatch, NewCalculation, UserId};

#[derive(Debug)]
struct Entry {
    calculation: Calculation,
    sequence: u64,
    deleted: bool,
}

type Handle = Arc<Mutex<Entry>>;

/// Calculation repository held in process memory.
pub struct InMemoryCalculationRepository {
    records: RwLock<HashMap<CalculationId, Handle>>,
    next_sequence: AtomicU64,
    clock: Arc<dyn Clock>,
}

fn poisoned<T>(_: T) -> CalculationRepositoryError {
    CalculationRepositoryError::query("calculation store lock poisoned")
}

fn lock_entry(handle: &Handle) -> Result<MutexGuard<'_, Entry>, CalculationRepositoryError> {
    handle.lock().map_err(poisoned)
}

impl InMemoryCalculationRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            next_sequence: AtomicU64::new(0),
            clock,
        }
    }

    fn handle(&self, id: &CalculationId) -> Result<Option<Handle>, CalculationRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    fn handles(&self) -> Result<Vec<Handle>, CalculationRepositoryError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.values().cloned().collect())
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn list(&self, owner: &UserId) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let mut owned = Vec::new();
        for handle in self.handles()? {
            let entry = lock_entry(&handle)?;
            if !entry.deleted && entry.calculation.owner_id == *owner {
                owned.push((entry.sequence, entry.calculation.clone()));
            }
        }
        owned.sort_by_key(|(sequence, _)| *sequence);
        Ok(owned.into_iter().map(|(_, calculation)| calculation).collect())
    }

    async fn find(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let Some(handle) = self.handle(id)? else {
            return Ok(None);
        };
        let entry = lock_entry(&handle)?;
        Ok((!entry.deleted && entry.calculation.owner_id == *owner)
            .then(|| entry.calculation.clone()))
    }

    async fn create(
        &self,
        calculation: NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError> {
        let now = self.clock.utc();
        let stored = Calculation {
            id: CalculationId::random(),
            owner_id: calculation.owner_id,
            operation_kind: calculation.operation_kind,
            inputs: calculation.inputs,
            result: calculation.result,
            revision: 1,
            created_at: now,
            updated_at: now,
        };
        let entry = Entry {
            calculation: stored.clone(),
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
            deleted: false,
        };
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(stored.id, Arc::new(Mutex::new(entry)));
        Ok(stored)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &CalculationId,
        patch: CalculationPatch,
        expected_revision: u32,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let Some(handle) = self.handle(id)? else {
            return Ok(None);
        };
        let mut entry = lock_entry(&handle)?;
        if entry.deleted || entry.calculation.owner_id != *owner {
            return Ok(None);
        }
        let actual = entry.calculation.revision;
        if actual != expected_revision {
            return Err(CalculationRepositoryError::revision_mismatch(
                expected_revision,
                actual,
            ));
        }
        patch.apply_to(&mut entry.calculation);
        entry.calculation.revision = actual + 1;
        entry.calculation.updated_at = self.clock.utc();
        Ok(Some(entry.calculation.clone()))
    }

    async fn delete(
        &self,
        owner: &UserId,
        id: &CalculationId,
    ) -> Result<bool, CalculationRepositoryError> {
        let Some(handle) = self.handle(id)? else {
            return Ok(false);
        };
        {
            let mut entry = lock_entry(&handle)?;
            if entry.deleted || entry.calculation.owner_id != *owner {
                return Ok(false);
            }
            entry.deleted = true;
        }
        let mut records = self.records.write().map_err(poisoned)?;
        records.remove(id);
        Ok(true)
    }
}
