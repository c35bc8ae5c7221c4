//! Orders service.

use std::sync::Arc;

use tiffin::{ids::UserId, order::partition_lines};
use tracing::{debug, instrument};

use crate::{
    domain::{
        estimates::{models::EstimateId, store::EstimateStore},
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, NewOrderLine, Order, OrderId, OrderLineId},
            store::OrderStore,
        },
    },
    ids::IdGenerator,
};

/// Redeems previously issued estimates into committed orders.
#[derive(Clone)]
pub struct OrdersService {
    estimates: Arc<dyn EstimateStore>,
    orders: Arc<dyn OrderStore>,
    ids: Arc<dyn IdGenerator>,
}

impl OrdersService {
    #[must_use]
    pub fn new(
        estimates: Arc<dyn EstimateStore>,
        orders: Arc<dyn OrderStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            estimates,
            orders,
            ids,
        }
    }

    /// Convert a previously issued estimate into an order with one line
    /// per distinct merchant, carrying the estimate's cart lines
    /// verbatim.
    ///
    /// An estimate may be redeemed once, and only by the user it was
    /// issued to; a foreign user's estimate is reported as missing rather
    /// than revealed.
    ///
    /// # Errors
    ///
    /// [`OrdersServiceError::EstimateNotFound`] when the estimate does
    /// not exist or belongs to another user,
    /// [`OrdersServiceError::EstimateAlreadyRedeemed`] when it was
    /// already converted, [`OrdersServiceError::Storage`] on persistence
    /// faults (no order rows are written).
    #[instrument(skip(self), fields(estimate = %estimate_id, user = %user_id))]
    pub async fn create_order(
        &self,
        estimate_id: EstimateId,
        user_id: UserId,
    ) -> Result<Order, OrdersServiceError> {
        let estimate = self.estimates.get(estimate_id).await?;

        if estimate.user_id != user_id {
            return Err(OrdersServiceError::EstimateNotFound);
        }

        if estimate.redeemed {
            return Err(OrdersServiceError::EstimateAlreadyRedeemed);
        }

        let order = NewOrder {
            id: OrderId::new(self.ids.generate()),
            estimate_id: estimate.id,
            user_id,
        };

        let lines: Vec<NewOrderLine> = partition_lines(&estimate.lines)
            .into_iter()
            .map(|(merchant_id, lines)| NewOrderLine {
                id: OrderLineId::new(self.ids.generate()),
                merchant_id,
                lines,
            })
            .collect();

        let order = self.orders.insert(order, lines).await?;

        debug!(order = %order.id, "order committed");

        Ok(order)
    }
}
