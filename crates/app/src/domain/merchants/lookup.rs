//! Merchant lookup.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Row, postgres::PgRow};
use tiffin::{
    catalog::{Merchant, MerchantCategory, MerchantId},
    geo::GeoPoint,
};

use crate::{database::Db, domain::errors::LookupError};

const LIST_MERCHANTS_BY_IDS_SQL: &str = include_str!("sql/list_merchants_by_ids.sql");

/// Read-only merchant resolution.
///
/// Ids without a matching merchant are simply absent from the result;
/// callers detect them by comparing counts.
#[automock]
#[async_trait]
pub trait MerchantsLookup: Send + Sync {
    /// Resolve the merchants with the given ids.
    async fn list_by_ids(&self, ids: Vec<MerchantId>) -> Result<Vec<Merchant>, LookupError>;
}

/// Postgres-backed merchant lookup.
#[derive(Debug, Clone)]
pub struct PgMerchantsLookup {
    db: Db,
}

impl PgMerchantsLookup {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MerchantsLookup for PgMerchantsLookup {
    async fn list_by_ids(&self, ids: Vec<MerchantId>) -> Result<Vec<Merchant>, LookupError> {
        let ids: Vec<String> = ids.into_iter().map(MerchantId::into_string).collect();

        let rows = sqlx::query(LIST_MERCHANTS_BY_IDS_SQL)
            .bind(&ids)
            .fetch_all(self.db.pool())
            .await?;

        let merchants = rows
            .iter()
            .map(merchant_from_row)
            .collect::<Result<_, _>>()?;

        Ok(merchants)
    }
}

fn merchant_from_row(row: &PgRow) -> Result<Merchant, sqlx::Error> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<MerchantCategory>()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: "category".to_string(),
            source: Box::new(error),
        })?;

    Ok(Merchant {
        id: MerchantId::new(row.try_get::<String, _>("id")?),
        category,
        location: GeoPoint::new(row.try_get("lat")?, row.try_get("lng")?),
    })
}
