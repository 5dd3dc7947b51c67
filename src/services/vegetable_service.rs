//! Vegetable business rules: not-found mapping, the update id check and
//! startup seeding.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{NewVegetable, Vegetable};
use crate::repositories::VegetableStore;

#[derive(Clone)]
pub struct VegetableService {
    store: Arc<dyn VegetableStore>,
}

impl VegetableService {
    pub fn new(store: Arc<dyn VegetableStore>) -> Self {
        Self { store }
    }

    pub async fn list_vegetables(&self) -> AppResult<Vec<Vegetable>> {
        self.store.list_all().await
    }

    /// Returns the row or `NotFound`.
    pub async fn get_vegetable(&self, id: i32) -> AppResult<Vegetable> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::vegetable_not_found(id))
    }

    pub async fn create_vegetable(&self, new_vegetable: NewVegetable) -> AppResult<Vegetable> {
        let vegetable = self.store.create(new_vegetable).await?;
        tracing::info!(vegetable_id = vegetable.id, "Vegetable created");
        Ok(vegetable)
    }

    /// Full replace of the row at `id`.
    ///
    /// # Errors
    /// * `BadRequest` when `vegetable.id` differs from `id`; storage is not touched
    /// * `NotFound` when no row has that id
    pub async fn update_vegetable(&self, id: i32, vegetable: Vegetable) -> AppResult<Vegetable> {
        if vegetable.id != id {
            return Err(AppError::BadRequest {
                message: format!(
                    "Path id {} does not match body id {}",
                    id, vegetable.id
                ),
            });
        }

        let updated = self
            .store
            .replace(vegetable)
            .await?
            .ok_or_else(|| AppError::vegetable_not_found(id))?;
        tracing::info!(vegetable_id = id, "Vegetable updated");
        Ok(updated)
    }

    pub async fn delete_vegetable(&self, id: i32) -> AppResult<()> {
        match self.store.delete(id).await? {
            0 => Err(AppError::vegetable_not_found(id)),
            _ => {
                tracing::info!(vegetable_id = id, "Vegetable deleted");
                Ok(())
            }
        }
    }

    /// Inserts the default "Tomatoes" row when the table is empty.
    ///
    /// Runs once at startup. Returns whether a row was inserted.
    pub async fn ensure_seeded(&self) -> AppResult<bool> {
        if self.store.count().await? > 0 {
            return Ok(false);
        }

        let seeded = self.store.create(NewVegetable::default_seed()).await?;
        tracing::info!(vegetable_id = seeded.id, "Seeded default vegetable");
        Ok(true)
    }

    pub async fn check_storage(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
