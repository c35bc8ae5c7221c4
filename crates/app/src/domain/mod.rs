//! Marketplace domain concerns.

pub mod errors;
pub mod estimates;
pub mod items;
pub mod merchants;
pub mod orders;
