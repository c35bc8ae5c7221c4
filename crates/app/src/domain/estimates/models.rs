//! Estimate models.

use jiff::Timestamp;
use tiffin::{
    cart::CartLine,
    catalog::MerchantId,
    estimate::CalculatedEstimate,
    geo::GeoPoint,
    ids::{TypedId, UserId},
};

/// Identifier of a persisted estimate.
pub type EstimateId = TypedId<Estimate>;

/// A persisted estimate.
///
/// Estimates are append-only: price and delivery time are frozen when the
/// record is written and never revised, even at redemption time. Only the
/// `redeemed` flag changes, once, when the estimate is converted into an
/// order.
#[derive(Debug, Clone)]
pub struct Estimate {
    /// The estimate's identifier.
    pub id: EstimateId,
    /// The user the estimate was issued to.
    pub user_id: UserId,
    /// Where the delivery ends.
    pub user_location: GeoPoint,
    /// Distinct merchant ids referenced by the cart.
    pub merchant_ids: Vec<MerchantId>,
    /// The cart lines as originally submitted.
    pub lines: Vec<CartLine>,
    /// Total price in integer minor currency units.
    pub total_price: u64,
    /// Estimated delivery time in whole minutes.
    pub estimated_minutes: u32,
    /// Whether the estimate has been redeemed into an order.
    pub redeemed: bool,
    /// When the estimate was written.
    pub created_at: Timestamp,
}

/// A freshly calculated estimate ready for insertion.
#[derive(Debug, Clone)]
pub struct NewEstimate {
    /// The identifier minted for the estimate.
    pub id: EstimateId,
    /// The requesting user.
    pub user_id: UserId,
    /// The calculation outcome to persist.
    pub calculated: CalculatedEstimate,
}

/// The caller-facing outcome of an estimate build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateQuote {
    /// The persisted estimate's identifier, redeemable into an order.
    pub estimate_id: EstimateId,
    /// Total price in integer minor currency units.
    pub total_price: u64,
    /// Estimated delivery time in whole minutes.
    pub estimated_minutes: u32,
}
