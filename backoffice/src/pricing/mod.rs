//! Pricing Module
//!
//! Unit conversion and per-fraction prices for products sold by weight or by unit.
//! Uses rust_decimal for the arithmetic; prices leave this module as whole
//! currency units (`i64`).

mod fraction;
pub mod units;

pub use fraction::*;
pub use units::{PricingError, same_weight, sort_weight, to_grams};
