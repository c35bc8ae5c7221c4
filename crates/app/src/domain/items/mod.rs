//! Menu items

pub mod lookup;

pub use lookup::{ItemsLookup, PgItemsLookup};
