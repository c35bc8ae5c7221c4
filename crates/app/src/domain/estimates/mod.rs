//! Estimates

pub mod errors;
pub mod models;
pub mod service;
pub mod store;

pub use errors::EstimatesServiceError;
pub use service::EstimatesService;
pub use store::{EstimateStore, EstimateStoreError, PgEstimateStore};
