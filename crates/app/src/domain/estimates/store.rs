//! Estimate persistence.

use std::num::TryFromIntError;

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{Row, postgres::PgRow, types::Json};
use thiserror::Error;
use tiffin::{cart::CartLine, catalog::MerchantId, geo::GeoPoint, ids::UserId};

use crate::{
    database::Db,
    domain::estimates::models::{Estimate, EstimateId, NewEstimate},
};

const INSERT_ESTIMATE_SQL: &str = include_str!("sql/insert_estimate.sql");
const GET_ESTIMATE_SQL: &str = include_str!("sql/get_estimate.sql");

/// Estimate persistence failures.
#[derive(Debug, Error)]
pub enum EstimateStoreError {
    /// No estimate exists with the requested id.
    #[error("estimate not found")]
    NotFound,

    /// A price or duration does not fit its column type.
    #[error("amount out of range")]
    AmountOutOfRange(#[from] TryFromIntError),

    /// The underlying query failed.
    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for EstimateStoreError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}

/// Append-only estimate storage.
#[automock]
#[async_trait]
pub trait EstimateStore: Send + Sync {
    /// Persist a freshly calculated estimate.
    ///
    /// Nothing is written when an error is returned, so the caller may
    /// safely retry with the same input.
    async fn insert(&self, estimate: NewEstimate) -> Result<Estimate, EstimateStoreError>;

    /// Fetch a previously issued estimate.
    async fn get(&self, id: EstimateId) -> Result<Estimate, EstimateStoreError>;
}

/// Postgres-backed estimate storage.
#[derive(Debug, Clone)]
pub struct PgEstimateStore {
    db: Db,
}

impl PgEstimateStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EstimateStore for PgEstimateStore {
    async fn insert(&self, estimate: NewEstimate) -> Result<Estimate, EstimateStoreError> {
        let total_price = i64::try_from(estimate.calculated.total_price)?;
        let estimated_minutes = i32::try_from(estimate.calculated.estimated_minutes)?;

        let row = sqlx::query(INSERT_ESTIMATE_SQL)
            .bind(estimate.id.as_str())
            .bind(estimate.user_id.as_str())
            .bind(estimate.calculated.user_location.lat)
            .bind(estimate.calculated.user_location.lng)
            .bind(Json(&estimate.calculated.merchant_ids))
            .bind(Json(&estimate.calculated.lines))
            .bind(total_price)
            .bind(estimated_minutes)
            .fetch_one(self.db.pool())
            .await?;

        estimate_from_row(&row)
    }

    async fn get(&self, id: EstimateId) -> Result<Estimate, EstimateStoreError> {
        let row = sqlx::query(GET_ESTIMATE_SQL)
            .bind(id.as_str())
            .fetch_one(self.db.pool())
            .await?;

        estimate_from_row(&row)
    }
}

fn estimate_from_row(row: &PgRow) -> Result<Estimate, EstimateStoreError> {
    Ok(Estimate {
        id: EstimateId::new(row.try_get::<String, _>("id")?),
        user_id: UserId::new(row.try_get::<String, _>("user_id")?),
        user_location: GeoPoint::new(row.try_get("lat")?, row.try_get("lng")?),
        merchant_ids: row.try_get::<Json<Vec<MerchantId>>, _>("merchant_ids")?.0,
        lines: row.try_get::<Json<Vec<CartLine>>, _>("lines")?.0,
        total_price: try_get_amount(row, "total_price")?,
        estimated_minutes: try_get_minutes(row, "estimated_minutes")?,
        redeemed: row.try_get("redeemed")?,
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
    })
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, EstimateStoreError> {
    let amount_i64: i64 = row.try_get(col)?;

    Ok(u64::try_from(amount_i64)?)
}

fn try_get_minutes(row: &PgRow, col: &str) -> Result<u32, EstimateStoreError> {
    let minutes_i32: i32 = row.try_get(col)?;

    Ok(u32::try_from(minutes_i32)?)
}
