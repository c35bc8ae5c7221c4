//! Orders

pub mod errors;
pub mod models;
pub mod service;
pub mod store;

pub use errors::OrdersServiceError;
pub use service::OrdersService;
pub use store::{OrderStore, OrderStoreError, PgOrderStore};
