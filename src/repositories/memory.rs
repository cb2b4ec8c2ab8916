//! In-process repository used by the `memory` storage backend and by tests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::Repository;
use crate::error::{AppError, AppResult};
use crate::models::{self, Entity};

struct Table<E> {
    rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E: Entity> Table<E> {
    /// Fails when another row already holds the natural key of `row`.
    fn ensure_unique(&self, row: &E) -> AppResult<()> {
        let key = row.natural_key();
        let taken = self
            .rows
            .values()
            .any(|other| other.id() != row.id() && other.natural_key() == key);
        if taken {
            return Err(AppError::Duplicate {
                entity: E::KIND.table().to_string(),
                field: key.fields.to_string(),
                value: key.value,
            });
        }
        Ok(())
    }
}

/// Map-backed store with sequential ids.
///
/// Writes hold the mutex for the whole check-then-write, so natural-key
/// checks cannot race. References between tables are not checked.
pub struct MemoryRepository<E> {
    table: Mutex<Table<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Table<E>>> {
        self.table.lock().map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("memory store poisoned: {e}"),
        })
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn insert(&self, new: E::New) -> AppResult<E> {
        let mut table = self.lock()?;
        let row = E::materialize(table.next_id, new, models::now());
        table.ensure_unique(&row)?;
        table.next_id += 1;
        table.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    async fn find(&self, id: i64) -> AppResult<Option<E>> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<E>, i64)> {
        let table = self.lock()?;
        let total = table.rows.len() as i64;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        let rows = table.rows.values().skip(offset).take(limit).cloned().collect();
        Ok((rows, total))
    }

    async fn update(&self, id: i64, changes: E::Changes) -> AppResult<Option<E>> {
        let mut table = self.lock()?;
        let Some(mut row) = table.rows.get(&id).cloned() else {
            return Ok(None);
        };
        row.apply(changes);
        table.ensure_unique(&row)?;
        table.rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
