//! Order models.

use jiff::Timestamp;
use tiffin::{
    cart::CartLine,
    catalog::MerchantId,
    ids::{TypedId, UserId},
};

use crate::domain::estimates::models::EstimateId;

/// Identifier of a committed order.
pub type OrderId = TypedId<Order>;

/// Identifier of a merchant-scoped order line.
pub type OrderLineId = TypedId<OrderLine>;

/// A committed order.
///
/// An order is a projection of exactly one estimate; it carries no price
/// or route data of its own.
#[derive(Debug, Clone)]
pub struct Order {
    /// The order's identifier.
    pub id: OrderId,
    /// The estimate the order was redeemed from.
    pub estimate_id: EstimateId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// When the order was committed.
    pub created_at: Timestamp,
}

/// The merchant-scoped slice of a committed order.
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// The order line's identifier.
    pub id: OrderLineId,
    /// The order the line belongs to.
    pub order_id: OrderId,
    /// The merchant fulfilling this slice.
    pub merchant_id: MerchantId,
    /// This merchant's cart lines, carried verbatim from the estimate.
    pub lines: Vec<CartLine>,
}

/// An order ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// The identifier minted for the order.
    pub id: OrderId,
    /// The estimate being redeemed.
    pub estimate_id: EstimateId,
    /// The user placing the order.
    pub user_id: UserId,
}

/// A merchant-scoped order line ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    /// The identifier minted for the line.
    pub id: OrderLineId,
    /// The merchant fulfilling this slice.
    pub merchant_id: MerchantId,
    /// This merchant's cart lines.
    pub lines: Vec<CartLine>,
}
