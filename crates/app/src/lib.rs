//! Estimate and order services of the tiffin marketplace.
//!
//! The transport layer (HTTP routing, authentication) lives elsewhere;
//! this crate wires the pure estimation core to Postgres-backed catalog
//! lookups and estimate/order storage.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
