//! Order persistence.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{Row, postgres::PgRow, types::Json};
use thiserror::Error;
use tiffin::ids::UserId;

use crate::{
    database::Db,
    domain::{
        estimates::models::EstimateId,
        orders::models::{NewOrder, NewOrderLine, Order, OrderId},
    },
};

const MARK_ESTIMATE_REDEEMED_SQL: &str = include_str!("sql/mark_estimate_redeemed.sql");
const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");

/// Order persistence failures.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// The estimate's single-use flag was already set.
    #[error("estimate already redeemed")]
    AlreadyRedeemed,

    /// The underlying query failed.
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

/// Atomic order persistence.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist an order and its merchant-scoped lines as one unit,
    /// consuming the originating estimate.
    ///
    /// Either every row becomes visible or none do; a concurrent
    /// redemption of the same estimate fails with
    /// [`OrderStoreError::AlreadyRedeemed`].
    async fn insert(
        &self,
        order: NewOrder,
        lines: Vec<NewOrderLine>,
    ) -> Result<Order, OrderStoreError>;
}

/// Postgres-backed order storage.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    db: Db,
}

impl PgOrderStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(
        &self,
        order: NewOrder,
        lines: Vec<NewOrderLine>,
    ) -> Result<Order, OrderStoreError> {
        let mut tx = self.db.begin_transaction().await?;

        // The estimate's single-use flag doubles as the concurrency
        // guard: the guarded UPDATE wins for exactly one transaction.
        let redeemed = sqlx::query(MARK_ESTIMATE_REDEEMED_SQL)
            .bind(order.estimate_id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if redeemed == 0 {
            return Err(OrderStoreError::AlreadyRedeemed);
        }

        let row = sqlx::query(INSERT_ORDER_SQL)
            .bind(order.id.as_str())
            .bind(order.estimate_id.as_str())
            .bind(order.user_id.as_str())
            .fetch_one(&mut *tx)
            .await?;

        for line in &lines {
            sqlx::query(INSERT_ORDER_LINE_SQL)
                .bind(line.id.as_str())
                .bind(order.id.as_str())
                .bind(line.merchant_id.as_str())
                .bind(Json(&line.lines))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        order_from_row(&row)
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, OrderStoreError> {
    Ok(Order {
        id: OrderId::new(row.try_get::<String, _>("id")?),
        estimate_id: EstimateId::new(row.try_get::<String, _>("estimate_id")?),
        user_id: UserId::new(row.try_get::<String, _>("user_id")?),
        created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
    })
}
