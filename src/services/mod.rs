//! Service layer: business rules between handlers and the persistence
//! context.

mod vegetable_service;

pub use vegetable_service::VegetableService;

use std::sync::Arc;

use crate::repositories::VegetableStore;

/// Aggregates all services for the Axum state. Cloning shares the store.
#[derive(Clone)]
pub struct Services {
    pub vegetables: VegetableService,
}

impl Services {
    pub fn new(store: Arc<dyn VegetableStore>) -> Self {
        Self {
            vegetables: VegetableService::new(store),
        }
    }
}
