//! In-memory [`VegetableStore`] for handler and service tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{NewVegetable, Vegetable};
use crate::repositories::VegetableStore;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Vegetable>,
    /// Identity counter; never reused after deletes
    last_id: i32,
}

/// Mirrors the identity and ordering behavior of the Postgres table.
#[derive(Default)]
pub struct InMemoryVegetableStore {
    table: Mutex<Table>,
    unavailable: AtomicBool,
}

impl InMemoryVegetableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like a dropped pool.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn table(&self) -> AppResult<std::sync::MutexGuard<'_, Table>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::ConnectionPool {
                source: anyhow::anyhow!("store marked unavailable"),
            });
        }
        self.table.lock().map_err(|_| AppError::Internal {
            source: anyhow::anyhow!("in-memory store lock poisoned"),
        })
    }
}

#[async_trait]
impl VegetableStore for InMemoryVegetableStore {
    async fn list_all(&self) -> AppResult<Vec<Vegetable>> {
        Ok(self.table()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vegetable>> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn create(&self, new_vegetable: NewVegetable) -> AppResult<Vegetable> {
        let mut table = self.table()?;
        table.last_id += 1;
        let vegetable = new_vegetable.with_id(table.last_id);
        table.rows.insert(vegetable.id, vegetable.clone());
        Ok(vegetable)
    }

    async fn replace(&self, vegetable: Vegetable) -> AppResult<Option<Vegetable>> {
        let mut table = self.table()?;
        match table.rows.get_mut(&vegetable.id) {
            Some(row) => {
                *row = vegetable.clone();
                Ok(Some(vegetable))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<usize> {
        Ok(self.table()?.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.table()?.rows.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        self.table().map(|_| ())
    }
}
