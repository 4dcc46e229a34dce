//! Unit Converter
//!
//! Converts fraction labels (`100g`, `1kg`, `0.5kg`) to grams.

use rust_decimal::prelude::*;
use std::str::FromStr;
use thiserror::Error;

const GRAMS_PER_KG: Decimal = Decimal::ONE_THOUSAND;

/// A fraction label that cannot be converted to grams
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The label has a known unit but the amount is not a non-negative number
    #[error("fraction '{label}' is malformed")]
    MalformedLabel { label: String },
    /// The label does not end in `g` or `kg`
    #[error("fraction '{label}' has no recognized unit (expected g or kg)")]
    UnrecognizedUnit { label: String },
}

impl PricingError {
    pub fn label(&self) -> &str {
        match self {
            Self::MalformedLabel { label } | Self::UnrecognizedUnit { label } => label,
        }
    }
}

impl From<PricingError> for shared::AppError {
    fn from(err: PricingError) -> Self {
        let label = err.label().to_string();
        shared::AppError::with_message(shared::ErrorCode::MalformedFraction, err.to_string())
            .with_detail("label", label)
    }
}

/// Convert a fraction label to grams
///
/// The label is trimmed and lower-cased first. `kg` multiplies by 1000,
/// `g` is taken as is; whitespace between amount and unit is tolerated.
pub fn to_grams(label: &str) -> Result<Decimal, PricingError> {
    let normalized = label.trim().to_lowercase();

    let (amount, factor) = if let Some(amount) = normalized.strip_suffix("kg") {
        (amount, GRAMS_PER_KG)
    } else if let Some(amount) = normalized.strip_suffix('g') {
        (amount, Decimal::ONE)
    } else {
        return Err(PricingError::UnrecognizedUnit {
            label: normalized.clone(),
        });
    };

    let malformed = || PricingError::MalformedLabel {
        label: normalized.clone(),
    };
    let amount = Decimal::from_str(amount.trim()).map_err(|_| malformed())?;
    if amount.is_sign_negative() {
        return Err(malformed());
    }

    amount.checked_mul(factor).ok_or_else(malformed)
}

/// Whether two labels denote the same weight
///
/// Labels that do not convert are compared on their normalized text.
pub fn same_weight(a: &str, b: &str) -> bool {
    match (to_grams(a), to_grams(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}

/// Sort key used when ordering fractions: unparsable labels weigh zero
pub fn sort_weight(label: &str) -> Decimal {
    to_grams(label).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams() {
        assert_eq!(to_grams("250g").unwrap(), Decimal::from(250));
        assert_eq!(to_grams("100g").unwrap(), Decimal::from(100));
        assert_eq!(to_grams(" 250G ").unwrap(), Decimal::from(250));
    }

    #[test]
    fn test_kilograms() {
        assert_eq!(to_grams("1kg").unwrap(), Decimal::from(1000));
        assert_eq!(to_grams("0.5kg").unwrap(), Decimal::from(500));
        assert_eq!(to_grams("1 KG").unwrap(), Decimal::from(1000));
    }

    #[test]
    fn test_zero_is_valid() {
        assert_eq!(to_grams("0g").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_unrecognized_unit() {
        assert_eq!(
            to_grams("abc"),
            Err(PricingError::UnrecognizedUnit {
                label: "abc".into()
            })
        );
        assert!(matches!(
            to_grams("unidad"),
            Err(PricingError::UnrecognizedUnit { .. })
        ));
        assert!(matches!(
            to_grams(""),
            Err(PricingError::UnrecognizedUnit { .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            to_grams("abcg"),
            Err(PricingError::MalformedLabel { .. })
        ));
        assert!(matches!(to_grams("kg"), Err(PricingError::MalformedLabel { .. })));
        assert!(matches!(
            to_grams("-100g"),
            Err(PricingError::MalformedLabel { .. })
        ));
    }

    #[test]
    fn test_overflowing_kilograms_are_malformed() {
        assert!(matches!(
            to_grams("99999999999999999999999999kg"),
            Err(PricingError::MalformedLabel { .. })
        ));
    }

    #[test]
    fn test_same_weight() {
        assert!(same_weight("1kg", "1000g"));
        assert!(same_weight("250g", "250G"));
        assert!(!same_weight("250g", "500g"));
        assert!(same_weight("Surtido", "surtido"));
    }

    #[test]
    fn test_sort_weight_of_unparsable_is_zero() {
        assert_eq!(sort_weight("surtido"), Decimal::ZERO);
        assert_eq!(sort_weight("0.25kg"), Decimal::from(250));
    }

    #[test]
    fn test_into_app_error() {
        let err: shared::AppError = to_grams("abc").unwrap_err().into();
        assert_eq!(err.code, shared::ErrorCode::MalformedFraction);
    }
}
