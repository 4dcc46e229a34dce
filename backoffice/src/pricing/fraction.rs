//! Fraction Pricer
//!
//! Price of one packaging size given the product's base price.
//! Prices are whole currency units: the result is always rounded half-up
//! to an integer, cents are never kept.

use super::units::to_grams;
use rust_decimal::prelude::*;
use shared::UnitType;

const GRAMS_PER_KG: Decimal = Decimal::ONE_THOUSAND;

/// Round a money value to whole currency units (half-up)
#[inline]
pub fn round_currency(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}

/// Price of `label` for a product with the given base price
///
/// - UNIDAD: the base price rounded to whole units, whatever the label says
/// - KG: `base_price * grams / 1000`
///
/// Returns `None` when a KG label cannot be converted to grams or the price
/// does not fit in a decimal; the caller decides how to surface that.
pub fn price_for_fraction(unit_type: UnitType, base_price: Decimal, label: &str) -> Option<i64> {
    match unit_type {
        UnitType::ByUnit => Some(round_currency(base_price)),
        UnitType::ByWeight => {
            let grams = to_grams(label).ok()?;
            base_price
                .checked_mul(grams)
                .and_then(|v| v.checked_div(GRAMS_PER_KG))
                .map(round_currency)
        }
    }
}
