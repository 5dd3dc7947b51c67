//! Shared state handed to every Axum handler.

use std::sync::Arc;

use crate::db::AsyncDbPool;
use crate::repositories::{VegetableRepository, VegetableStore};
use crate::services::Services;

/// Cloning is cheap: services only hold an `Arc` to the store.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    /// Builds the PostgreSQL-backed store from the pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self::from_store(Arc::new(VegetableRepository::new(pool)))
    }

    /// Builds state over any store implementation.
    pub fn from_store(store: Arc<dyn VegetableStore>) -> Self {
        Self {
            services: Services::new(store),
        }
    }
}
