//! Estimate calculation.
//!
//! Turns a validated cart plus the resolved merchants and items into a
//! priced, time-estimated quote. Prices are frozen here: redeeming an
//! estimate later never goes back to the catalog.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    cart::{CartError, CartLine, ValidCart},
    catalog::{Item, ItemId, Merchant, MerchantId},
    geo::GeoPoint,
    route::{self, RouteError},
};

/// Failures of estimate calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EstimateError {
    /// The cart is structurally invalid.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// At least one referenced merchant does not exist.
    #[error("some merchants are not found")]
    SomeMerchantNotFound,

    /// At least one referenced item does not exist.
    #[error("some items are not found")]
    SomeItemNotFound,

    /// The cart's merchants are too spread out around the user.
    #[error("distance too far")]
    DistanceTooFar,

    /// The cart's total price exceeds the representable range.
    #[error("total price out of range")]
    PriceOverflow,
}

impl From<RouteError> for EstimateError {
    fn from(error: RouteError) -> Self {
        match error {
            RouteError::DistanceTooFar => Self::DistanceTooFar,
        }
    }
}

/// A priced, time-estimated quote computed from a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedEstimate {
    /// Where the delivery ends.
    pub user_location: GeoPoint,
    /// Distinct merchant ids referenced by the cart, first-appearance
    /// order.
    pub merchant_ids: Vec<MerchantId>,
    /// The cart lines as originally submitted.
    pub lines: Vec<CartLine>,
    /// Total price in integer minor currency units.
    pub total_price: u64,
    /// Estimated delivery time in whole minutes.
    pub estimated_minutes: u32,
}

impl CalculatedEstimate {
    /// Price the cart and estimate its delivery time against the resolved
    /// `merchants` and `items`.
    ///
    /// The lookups return only records that exist, so a count mismatch
    /// against the cart's distinct ids means something was not found.
    ///
    /// # Errors
    ///
    /// [`EstimateError::SomeMerchantNotFound`] or
    /// [`EstimateError::SomeItemNotFound`] when a referenced record did
    /// not resolve, [`EstimateError::DistanceTooFar`] when the route is
    /// not serviceable, [`EstimateError::PriceOverflow`] when the summed
    /// price does not fit the supported range.
    pub fn calculate(
        cart: ValidCart,
        user_location: GeoPoint,
        merchants: &[Merchant],
        items: &[Item],
    ) -> Result<Self, EstimateError> {
        if merchants.len() != cart.merchant_ids.len() {
            return Err(EstimateError::SomeMerchantNotFound);
        }

        if items.len() != cart.item_ids.len() {
            return Err(EstimateError::SomeItemNotFound);
        }

        let prices: FxHashMap<&ItemId, u64> =
            items.iter().map(|item| (&item.id, item.price)).collect();

        let mut total_price = 0_u64;
        for line in &cart.lines {
            let Some(price) = prices.get(&line.item_id) else {
                return Err(EstimateError::SomeItemNotFound);
            };

            let line_total = price
                .checked_mul(u64::from(line.quantity))
                .ok_or(EstimateError::PriceOverflow)?;
            total_price = total_price
                .checked_add(line_total)
                .ok_or(EstimateError::PriceOverflow)?;
        }

        let mut start = None;
        let mut stops = Vec::with_capacity(merchants.len().saturating_sub(1));
        for merchant in merchants {
            if merchant.id == cart.start_merchant_id {
                start = Some(merchant.location);
            } else {
                stops.push(merchant.location);
            }
        }

        let Some(start) = start else {
            return Err(EstimateError::SomeMerchantNotFound);
        };

        let estimated_minutes = route::estimate_route(start, &stops, user_location)?;

        Ok(Self {
            user_location,
            merchant_ids: cart.merchant_ids,
            lines: cart.lines,
            total_price,
            estimated_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        cart::{EstimateRequest, ItemOrder, MerchantOrder},
        catalog::{ItemCategory, MerchantCategory},
    };

    use super::*;

    fn merchant(id: &str, lat: f64, lng: f64) -> Merchant {
        Merchant {
            id: id.into(),
            category: MerchantCategory::SmallRestaurant,
            location: GeoPoint::new(lat, lng),
        }
    }

    fn item(id: &str, merchant_id: &str, price: u64) -> Item {
        Item {
            id: id.into(),
            merchant_id: merchant_id.into(),
            category: ItemCategory::Food,
            price,
        }
    }

    fn two_merchant_cart() -> ValidCart {
        EstimateRequest {
            user_location: GeoPoint::new(1.002, 1.002),
            orders: vec![
                MerchantOrder {
                    merchant_id: "m1".into(),
                    starting_point: true,
                    items: vec![
                        ItemOrder {
                            item_id: "i1".into(),
                            quantity: 2,
                        },
                        ItemOrder {
                            item_id: "i2".into(),
                            quantity: 1,
                        },
                    ],
                },
                MerchantOrder {
                    merchant_id: "m2".into(),
                    starting_point: false,
                    items: vec![ItemOrder {
                        item_id: "i3".into(),
                        quantity: 3,
                    }],
                },
            ],
        }
        .validate()
        .expect("fixture cart should be valid")
    }

    #[test]
    fn total_price_sums_unit_price_times_quantity() -> TestResult {
        let merchants = [
            merchant("m1", 1.000, 1.000),
            merchant("m2", 1.001, 1.001),
        ];
        let items = [
            item("i1", "m1", 15_000),
            item("i2", "m1", 7_500),
            item("i3", "m2", 2_000),
        ];

        let estimate = CalculatedEstimate::calculate(
            two_merchant_cart(),
            GeoPoint::new(1.002, 1.002),
            &merchants,
            &items,
        )?;

        // 2 * 15_000 + 1 * 7_500 + 3 * 2_000
        assert_eq!(estimate.total_price, 43_500);

        Ok(())
    }

    #[test]
    fn missing_merchant_fails_before_pricing() {
        let merchants = [merchant("m1", 1.000, 1.000)];
        let items = [
            item("i1", "m1", 15_000),
            item("i2", "m1", 7_500),
            item("i3", "m2", 2_000),
        ];

        let result = CalculatedEstimate::calculate(
            two_merchant_cart(),
            GeoPoint::new(1.002, 1.002),
            &merchants,
            &items,
        );

        assert_eq!(result, Err(EstimateError::SomeMerchantNotFound));
    }

    #[test]
    fn missing_item_fails_before_routing() {
        let merchants = [
            merchant("m1", 1.000, 1.000),
            merchant("m2", 1.001, 1.001),
        ];
        let items = [item("i1", "m1", 15_000), item("i3", "m2", 2_000)];

        let result = CalculatedEstimate::calculate(
            two_merchant_cart(),
            GeoPoint::new(1.002, 1.002),
            &merchants,
            &items,
        );

        assert_eq!(result, Err(EstimateError::SomeItemNotFound));
    }

    #[test]
    fn overflowing_total_price_is_rejected() {
        let merchants = [
            merchant("m1", 1.000, 1.000),
            merchant("m2", 1.001, 1.001),
        ];
        // i1 is ordered twice, so the multiplication alone overflows.
        let items = [
            item("i1", "m1", u64::MAX),
            item("i2", "m1", 7_500),
            item("i3", "m2", 2_000),
        ];

        let result = CalculatedEstimate::calculate(
            two_merchant_cart(),
            GeoPoint::new(1.002, 1.002),
            &merchants,
            &items,
        );

        assert_eq!(result, Err(EstimateError::PriceOverflow));
    }

    #[test]
    fn spread_out_merchants_are_infeasible() {
        let merchants = [
            merchant("m1", 1.000, 1.000),
            merchant("m2", 1.000, 1.020),
        ];
        let items = [
            item("i1", "m1", 15_000),
            item("i2", "m1", 7_500),
            item("i3", "m2", 2_000),
        ];

        let result = CalculatedEstimate::calculate(
            two_merchant_cart(),
            GeoPoint::new(1.000, 1.000),
            &merchants,
            &items,
        );

        assert_eq!(result, Err(EstimateError::DistanceTooFar));
    }

    #[test]
    fn estimate_carries_cart_lines_verbatim() -> TestResult {
        let merchants = [
            merchant("m1", 1.000, 1.000),
            merchant("m2", 1.001, 1.001),
        ];
        let items = [
            item("i1", "m1", 15_000),
            item("i2", "m1", 7_500),
            item("i3", "m2", 2_000),
        ];

        let cart = two_merchant_cart();
        let lines = cart.lines.clone();

        let estimate = CalculatedEstimate::calculate(
            cart,
            GeoPoint::new(1.002, 1.002),
            &merchants,
            &items,
        )?;

        assert_eq!(estimate.lines, lines);
        assert_eq!(
            estimate
                .merchant_ids
                .iter()
                .map(MerchantId::as_str)
                .collect::<Vec<_>>(),
            ["m1", "m2"]
        );

        Ok(())
    }
}
