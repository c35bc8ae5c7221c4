//! Cart requests and structural validation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{ItemId, MerchantId},
    geo::GeoPoint,
};

/// A structurally invalid cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The cart contains no merchant orders.
    #[error("cart has no merchant orders")]
    Empty,

    /// A merchant order carries no item lines.
    #[error("merchant order {0} has no item lines")]
    NoItems(usize),

    /// An item line requests a zero quantity.
    #[error("cart line {0} has zero quantity")]
    ZeroQuantity(usize),

    /// Zero or more than one merchant order is flagged as the starting
    /// point.
    #[error("exactly one merchant order must be the starting point")]
    StartingPointInvalid,
}

/// One `(merchant, item, quantity)` tuple of a cart, as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The merchant the item is bought from.
    pub merchant_id: MerchantId,
    /// The requested item.
    pub item_id: ItemId,
    /// How many units are requested. Always at least one.
    pub quantity: u32,
}

/// One requested item with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOrder {
    /// The requested item.
    pub item_id: ItemId,
    /// How many units are requested.
    pub quantity: u32,
}

/// The items requested from a single merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantOrder {
    /// The merchant the items are bought from.
    pub merchant_id: MerchantId,
    /// Whether the delivery route begins at this merchant.
    pub starting_point: bool,
    /// The requested items.
    pub items: Vec<ItemOrder>,
}

/// A cart submitted for estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Where the delivery ends.
    pub user_location: GeoPoint,
    /// The per-merchant orders making up the cart.
    pub orders: Vec<MerchantOrder>,
}

/// The outcome of structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCart {
    /// The single merchant the delivery route starts from.
    pub start_merchant_id: MerchantId,
    /// Distinct merchant ids in first-appearance order.
    pub merchant_ids: Vec<MerchantId>,
    /// Distinct item ids in first-appearance order.
    pub item_ids: Vec<ItemId>,
    /// All cart lines, flattened in submission order.
    pub lines: Vec<CartLine>,
}

impl EstimateRequest {
    /// Check the cart's structure and flatten it into cart lines.
    ///
    /// A valid cart is non-empty, has at least one item line per merchant
    /// order, positive quantities throughout and exactly one merchant
    /// flagged as the starting point. Merchant and item ids are
    /// deduplicated in first-appearance order.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] describing the first violation found.
    pub fn validate(&self) -> Result<ValidCart, CartError> {
        if self.orders.is_empty() {
            return Err(CartError::Empty);
        }

        let mut start = None;
        let mut start_count = 0_usize;
        let mut merchant_ids = Vec::new();
        let mut seen_merchants = FxHashSet::default();
        let mut item_ids = Vec::new();
        let mut seen_items = FxHashSet::default();
        let mut lines = Vec::new();

        for (index, order) in self.orders.iter().enumerate() {
            if order.items.is_empty() {
                return Err(CartError::NoItems(index));
            }

            if order.starting_point {
                start_count += 1;
                start = Some(order.merchant_id.clone());
            }

            if seen_merchants.insert(order.merchant_id.clone()) {
                merchant_ids.push(order.merchant_id.clone());
            }

            for item in &order.items {
                if item.quantity == 0 {
                    return Err(CartError::ZeroQuantity(lines.len()));
                }

                if seen_items.insert(item.item_id.clone()) {
                    item_ids.push(item.item_id.clone());
                }

                lines.push(CartLine {
                    merchant_id: order.merchant_id.clone(),
                    item_id: item.item_id.clone(),
                    quantity: item.quantity,
                });
            }
        }

        let Some(start_merchant_id) = start else {
            return Err(CartError::StartingPointInvalid);
        };

        if start_count != 1 {
            return Err(CartError::StartingPointInvalid);
        }

        Ok(ValidCart {
            start_merchant_id,
            merchant_ids,
            item_ids,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn order(merchant: &str, starting_point: bool, items: &[(&str, u32)]) -> MerchantOrder {
        MerchantOrder {
            merchant_id: merchant.into(),
            starting_point,
            items: items
                .iter()
                .map(|&(item, quantity)| ItemOrder {
                    item_id: item.into(),
                    quantity,
                })
                .collect(),
        }
    }

    fn request(orders: Vec<MerchantOrder>) -> EstimateRequest {
        EstimateRequest {
            user_location: GeoPoint::new(0.0, 0.0),
            orders,
        }
    }

    #[test]
    fn single_starting_point_is_valid() -> TestResult {
        let cart = request(vec![
            order("m1", true, &[("i1", 1)]),
            order("m2", false, &[("i2", 2)]),
        ])
        .validate()?;

        assert_eq!(cart.start_merchant_id.as_str(), "m1");
        assert_eq!(cart.lines.len(), 2);

        Ok(())
    }

    #[test]
    fn empty_cart_is_rejected() {
        let result = request(Vec::new()).validate();

        assert_eq!(result, Err(CartError::Empty));
    }

    #[test]
    fn no_starting_point_is_rejected() {
        let result = request(vec![
            order("m1", false, &[("i1", 1)]),
            order("m2", false, &[("i2", 1)]),
        ])
        .validate();

        assert_eq!(result, Err(CartError::StartingPointInvalid));
    }

    #[test]
    fn two_starting_points_are_rejected() {
        let result = request(vec![
            order("m1", true, &[("i1", 1)]),
            order("m2", true, &[("i2", 1)]),
        ])
        .validate();

        assert_eq!(result, Err(CartError::StartingPointInvalid));
    }

    #[test]
    fn merchant_order_without_items_is_rejected() {
        let result = request(vec![
            order("m1", true, &[("i1", 1)]),
            order("m2", false, &[]),
        ])
        .validate();

        assert_eq!(result, Err(CartError::NoItems(1)));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = request(vec![order("m1", true, &[("i1", 1), ("i2", 0)])]).validate();

        assert_eq!(result, Err(CartError::ZeroQuantity(1)));
    }

    #[test]
    fn repeated_merchants_and_items_are_deduplicated_in_order() -> TestResult {
        let cart = request(vec![
            order("m2", true, &[("i1", 1)]),
            order("m1", false, &[("i2", 1), ("i1", 3)]),
            order("m2", false, &[("i3", 1)]),
        ])
        .validate()?;

        let merchants: Vec<&str> = cart.merchant_ids.iter().map(MerchantId::as_str).collect();
        let items: Vec<&str> = cart.item_ids.iter().map(ItemId::as_str).collect();

        assert_eq!(merchants, ["m2", "m1"]);
        assert_eq!(items, ["i1", "i2", "i3"]);
        assert_eq!(cart.lines.len(), 4);

        Ok(())
    }
}
