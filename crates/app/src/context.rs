//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        estimates::{EstimatesService, PgEstimateStore},
        items::PgItemsLookup,
        merchants::PgMerchantsLookup,
        orders::{OrdersService, PgOrderStore},
    },
    ids::RandomIds,
};

/// Failures while assembling the application context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database connection could not be established.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Shared service handles for the transport layer.
#[derive(Clone)]
pub struct AppContext {
    /// Builds priced, time-estimated quotes from carts.
    pub estimates: EstimatesService,
    /// Redeems estimates into committed orders.
    pub orders: OrdersService,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url).await.map_err(AppInitError::Database)?;
        let db = Db::new(pool);

        let estimate_store = Arc::new(PgEstimateStore::new(db.clone()));
        let ids = Arc::new(RandomIds);

        Ok(Self {
            estimates: EstimatesService::new(
                Arc::new(PgMerchantsLookup::new(db.clone())),
                Arc::new(PgItemsLookup::new(db.clone())),
                estimate_store.clone(),
                ids.clone(),
            ),
            orders: OrdersService::new(
                estimate_store,
                Arc::new(PgOrderStore::new(db)),
                ids,
            ),
        })
    }
}
