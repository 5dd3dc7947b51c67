//! Data Transfer Objects for API requests and responses.
//!
//! - `vegetable` - JSON shape of the Vegetable resource
//! - `health` - health check payloads
//! - `error` - common error body

mod error;
mod health;
mod vegetable;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use vegetable::{CreateVegetableRequest, UpdateVegetableRequest, VegetableResponse};
