//! Resolved merchant and item views.
//!
//! These are the read-only shapes the lookup collaborators hand to the
//! estimation engine. Categories are closed enumerations; a value outside
//! the allow-list is rejected at the boundary rather than carried around
//! as a free-form string.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geo::GeoPoint, ids::TypedId};

/// Identifier of a merchant.
pub type MerchantId = TypedId<Merchant>;

/// Identifier of a menu item.
pub type ItemId = TypedId<Item>;

/// A category string outside the closed allow-list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

/// Merchant categories accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantCategory {
    /// A small restaurant.
    SmallRestaurant,
    /// A medium restaurant.
    MediumRestaurant,
    /// A large restaurant.
    LargeRestaurant,
    /// A merchandise restaurant.
    MerchandiseRestaurant,
    /// A booth or kiosk.
    BoothKiosk,
    /// A convenience store.
    ConvenienceStore,
}

impl MerchantCategory {
    /// The wire representation of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SmallRestaurant => "SmallRestaurant",
            Self::MediumRestaurant => "MediumRestaurant",
            Self::LargeRestaurant => "LargeRestaurant",
            Self::MerchandiseRestaurant => "MerchandiseRestaurant",
            Self::BoothKiosk => "BoothKiosk",
            Self::ConvenienceStore => "ConvenienceStore",
        }
    }
}

impl FromStr for MerchantCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SmallRestaurant" => Ok(Self::SmallRestaurant),
            "MediumRestaurant" => Ok(Self::MediumRestaurant),
            "LargeRestaurant" => Ok(Self::LargeRestaurant),
            "MerchandiseRestaurant" => Ok(Self::MerchandiseRestaurant),
            "BoothKiosk" => Ok(Self::BoothKiosk),
            "ConvenienceStore" => Ok(Self::ConvenienceStore),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Menu item categories accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Drinks.
    Beverage,
    /// Main dishes.
    Food,
    /// Snacks.
    Snack,
    /// Condiments.
    Condiments,
    /// Additions and extras.
    Additions,
}

impl ItemCategory {
    /// The wire representation of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beverage => "Beverage",
            Self::Food => "Food",
            Self::Snack => "Snack",
            Self::Condiments => "Condiments",
            Self::Additions => "Additions",
        }
    }
}

impl FromStr for ItemCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beverage" => Ok(Self::Beverage),
            "Food" => Ok(Self::Food),
            "Snack" => Ok(Self::Snack),
            "Condiments" => Ok(Self::Condiments),
            "Additions" => Ok(Self::Additions),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A merchant as resolved by the lookup collaborator. Read-only within
/// the estimation core.
#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    /// The merchant's identifier.
    pub id: MerchantId,
    /// The merchant's category.
    pub category: MerchantCategory,
    /// Where the merchant is located.
    pub location: GeoPoint,
}

/// A menu item as resolved by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// The item's identifier.
    pub id: ItemId,
    /// The merchant selling the item.
    pub merchant_id: MerchantId,
    /// The item's category.
    pub category: ItemCategory,
    /// Unit price in integer minor currency units.
    pub price: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_category_round_trips_through_str() {
        for category in [
            MerchantCategory::SmallRestaurant,
            MerchantCategory::MediumRestaurant,
            MerchantCategory::LargeRestaurant,
            MerchantCategory::MerchandiseRestaurant,
            MerchantCategory::BoothKiosk,
            MerchantCategory::ConvenienceStore,
        ] {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn item_category_round_trips_through_str() {
        for category in [
            ItemCategory::Beverage,
            ItemCategory::Food,
            ItemCategory::Snack,
            ItemCategory::Condiments,
            ItemCategory::Additions,
        ] {
            assert_eq!(category.as_str().parse(), Ok(category));
        }
    }

    #[test]
    fn unknown_merchant_category_is_rejected() {
        let result = "FoodTruck".parse::<MerchantCategory>();

        assert_eq!(result, Err(UnknownCategory("FoodTruck".to_string())));
    }

    #[test]
    fn unknown_item_category_is_rejected() {
        let result = "Dessert".parse::<ItemCategory>();

        assert_eq!(result, Err(UnknownCategory("Dessert".to_string())));
    }
}
