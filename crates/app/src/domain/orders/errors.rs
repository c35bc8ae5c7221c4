//! Orders service errors.

use thiserror::Error;

use crate::domain::{
    errors::ErrorClass,
    estimates::store::EstimateStoreError,
    orders::store::OrderStoreError,
};

/// Failures of order commitment.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The referenced estimate does not exist, or belongs to another
    /// user.
    #[error("estimate not found")]
    EstimateNotFound,

    /// The estimate was already redeemed into an order.
    #[error("estimate already redeemed")]
    EstimateAlreadyRedeemed,

    /// A persistence call failed; no order rows were written.
    #[error("storage error")]
    Storage(#[source] sqlx::Error),
}

impl OrdersServiceError {
    /// The transport-facing class of this failure.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EstimateNotFound => ErrorClass::NotFound,
            Self::EstimateAlreadyRedeemed => ErrorClass::Validation,
            Self::Storage(_) => ErrorClass::Internal,
        }
    }
}

impl From<EstimateStoreError> for OrdersServiceError {
    fn from(error: EstimateStoreError) -> Self {
        match error {
            EstimateStoreError::NotFound => Self::EstimateNotFound,
            EstimateStoreError::Sql(error) => Self::Storage(error),
            EstimateStoreError::AmountOutOfRange(error) => {
                Self::Storage(sqlx::Error::ColumnDecode {
                    index: "amount".to_string(),
                    source: Box::new(error),
                })
            }
        }
    }
}

impl From<OrderStoreError> for OrdersServiceError {
    fn from(error: OrderStoreError) -> Self {
        match error {
            OrderStoreError::AlreadyRedeemed => Self::EstimateAlreadyRedeemed,
            OrderStoreError::Sql(error) => Self::Storage(error),
        }
    }
}
