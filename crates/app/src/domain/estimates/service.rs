//! Estimates service.

use std::sync::Arc;

use tiffin::{
    cart::EstimateRequest,
    estimate::{CalculatedEstimate, EstimateError},
    ids::UserId,
};
use tracing::{debug, instrument};

use crate::{
    domain::{
        estimates::{
            errors::EstimatesServiceError,
            models::{EstimateId, EstimateQuote, NewEstimate},
            store::EstimateStore,
        },
        items::ItemsLookup,
        merchants::MerchantsLookup,
    },
    ids::IdGenerator,
};

/// Builds priced, time-estimated quotes from carts.
#[derive(Clone)]
pub struct EstimatesService {
    merchants: Arc<dyn MerchantsLookup>,
    items: Arc<dyn ItemsLookup>,
    estimates: Arc<dyn EstimateStore>,
    ids: Arc<dyn IdGenerator>,
}

impl EstimatesService {
    #[must_use]
    pub fn new(
        merchants: Arc<dyn MerchantsLookup>,
        items: Arc<dyn ItemsLookup>,
        estimates: Arc<dyn EstimateStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            merchants,
            items,
            estimates,
            ids,
        }
    }

    /// Validate the cart, price it, estimate its delivery time and
    /// persist the resulting estimate.
    ///
    /// # Errors
    ///
    /// Returns an [`EstimatesServiceError`]; its
    /// [`class`](EstimatesServiceError::class) distinguishes malformed
    /// carts, unresolvable merchants or items, unserviceable routes and
    /// storage faults. No estimate is written unless the whole build
    /// succeeded, so a storage fault may be retried with the same cart.
    #[instrument(skip(self, request), fields(user = %user_id))]
    pub async fn calculate_estimate(
        &self,
        request: &EstimateRequest,
        user_id: UserId,
    ) -> Result<EstimateQuote, EstimatesServiceError> {
        let cart = request.validate().map_err(EstimateError::Cart)?;

        let merchants = self.merchants.list_by_ids(cart.merchant_ids.clone()).await?;
        let items = self.items.list_by_ids(cart.item_ids.clone()).await?;

        let calculated =
            CalculatedEstimate::calculate(cart, request.user_location, &merchants, &items)?;

        let estimate = self
            .estimates
            .insert(NewEstimate {
                id: EstimateId::new(self.ids.generate()),
                user_id,
                calculated,
            })
            .await?;

        debug!(estimate = %estimate.id, minutes = estimate.estimated_minutes, "estimate calculated");

        Ok(EstimateQuote {
            estimate_id: estimate.id,
            total_price: estimate.total_price,
            estimated_minutes: estimate.estimated_minutes,
        })
    }
}
