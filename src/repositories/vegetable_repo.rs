//! PostgreSQL implementation of [`VegetableStore`] using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewVegetable, Vegetable};
use crate::repositories::VegetableStore;
use crate::schema::vegetables;

/// Repository over the shared pool. Cloning only bumps the pool's
/// reference count.
#[derive(Clone)]
pub struct VegetableRepository {
    pool: AsyncDbPool,
}

impl VegetableRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VegetableStore for VegetableRepository {
    async fn list_all(&self) -> AppResult<Vec<Vegetable>> {
        let mut conn = self.pool.get().await?;

        vegetables::table
            .select(Vegetable::as_select())
            .order(vegetables::id.asc())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list vegetables"))
    }

    async fn find_by_id(&self, vegetable_id: i32) -> AppResult<Option<Vegetable>> {
        let mut conn = self.pool.get().await?;

        vegetables::table
            .find(vegetable_id)
            .select(Vegetable::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find vegetable"))
    }

    async fn create(&self, new_vegetable: NewVegetable) -> AppResult<Vegetable> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(vegetables::table)
            .values(&new_vegetable)
            .returning(Vegetable::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert vegetable"))
    }

    async fn replace(&self, vegetable: Vegetable) -> AppResult<Option<Vegetable>> {
        let mut conn = self.pool.get().await?;

        diesel::update(vegetables::table.find(vegetable.id))
            .set(&vegetable)
            .returning(Vegetable::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update vegetable"))
    }

    async fn delete(&self, vegetable_id: i32) -> AppResult<usize> {
        let mut conn = self.pool.get().await?;

        diesel::delete(vegetables::table.find(vegetable_id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete vegetable"))
    }

    async fn count(&self) -> AppResult<i64> {
        let mut conn = self.pool.get().await?;

        vegetables::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "count vegetables"))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| AppError::Database {
                operation: "ping".to_string(),
                source: anyhow::Error::from(e),
            })
    }
}
