//! Tiffin
//!
//! Tiffin is the order-estimation and fulfilment core of a food-delivery
//! marketplace: cart validation, price aggregation, greedy delivery-route
//! estimation and merchant-partitioned order commitment. It is pure
//! compute; catalog lookups and persistence are capabilities supplied by
//! the surrounding application.

pub mod cart;
pub mod catalog;
pub mod estimate;
pub mod geo;
pub mod ids;
pub mod order;
pub mod route;
