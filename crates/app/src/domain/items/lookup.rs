//! Menu item lookup.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Row, postgres::PgRow};
use tiffin::catalog::{Item, ItemCategory, ItemId, MerchantId};

use crate::{database::Db, domain::errors::LookupError};

const LIST_ITEMS_BY_IDS_SQL: &str = include_str!("sql/list_items_by_ids.sql");

/// Read-only menu item resolution.
///
/// Ids without a matching item are simply absent from the result;
/// callers detect them by comparing counts.
#[automock]
#[async_trait]
pub trait ItemsLookup: Send + Sync {
    /// Resolve the items with the given ids.
    async fn list_by_ids(&self, ids: Vec<ItemId>) -> Result<Vec<Item>, LookupError>;
}

/// Postgres-backed menu item lookup.
#[derive(Debug, Clone)]
pub struct PgItemsLookup {
    db: Db,
}

impl PgItemsLookup {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemsLookup for PgItemsLookup {
    async fn list_by_ids(&self, ids: Vec<ItemId>) -> Result<Vec<Item>, LookupError> {
        let ids: Vec<String> = ids.into_iter().map(ItemId::into_string).collect();

        let rows = sqlx::query(LIST_ITEMS_BY_IDS_SQL)
            .bind(&ids)
            .fetch_all(self.db.pool())
            .await?;

        let items = rows.iter().map(item_from_row).collect::<Result<_, _>>()?;

        Ok(items)
    }
}

fn item_from_row(row: &PgRow) -> Result<Item, sqlx::Error> {
    let category: String = row.try_get("category")?;
    let category = category
        .parse::<ItemCategory>()
        .map_err(|error| sqlx::Error::ColumnDecode {
            index: "category".to_string(),
            source: Box::new(error),
        })?;

    Ok(Item {
        id: ItemId::new(row.try_get::<String, _>("id")?),
        merchant_id: MerchantId::new(row.try_get::<String, _>("merchant_id")?),
        category,
        price: try_get_price(row, "price")?,
    })
}

fn try_get_price(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let price_i64: i64 = row.try_get(col)?;

    u64::try_from(price_i64).map_err(|error| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(error),
    })
}
