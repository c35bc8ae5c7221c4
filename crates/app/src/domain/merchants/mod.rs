//! Merchants

pub mod lookup;

pub use lookup::{MerchantsLookup, PgMerchantsLookup};
