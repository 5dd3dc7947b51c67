//! Persistence context for the `Vegetables` table.
//!
//! Handlers never see the pool directly: they go through a
//! [`VegetableStore`] built once at startup and shared via `AppState`.

#[cfg(test)]
mod memory;
mod vegetable_repo;

#[cfg(test)]
pub use memory::InMemoryVegetableStore;
pub use vegetable_repo::VegetableRepository;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{NewVegetable, Vegetable};

/// Storage operations over the Vegetable collection.
///
/// Every mutating call is committed when it returns.
#[async_trait]
pub trait VegetableStore: Send + Sync {
    /// All rows ordered by id.
    async fn list_all(&self) -> AppResult<Vec<Vegetable>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Vegetable>>;

    /// Inserts a row and returns it with the assigned id.
    async fn create(&self, new_vegetable: NewVegetable) -> AppResult<Vegetable>;

    /// Overwrites every non-key column of the row with `vegetable.id`.
    /// Returns `None` when no such row exists.
    async fn replace(&self, vegetable: Vegetable) -> AppResult<Option<Vegetable>>;

    /// Returns the number of rows removed.
    async fn delete(&self, id: i32) -> AppResult<usize>;

    async fn count(&self) -> AppResult<i64>;

    /// Cheap round trip used by the health endpoints.
    async fn ping(&self) -> AppResult<()>;
}
