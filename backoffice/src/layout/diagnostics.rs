//! Layout diagnostics
//!
//! Non-fatal findings collected while laying out a catalog. Each one is
//! logged at WARN when emitted and kept on the result for the caller.

use serde::Serialize;
use shared::FractionLabel;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// More fractions than columns; the largest ones were dropped
    CapacityExceeded {
        category: String,
        /// `None` for the category header
        product: Option<String>,
        allowed: usize,
        dropped: Vec<FractionLabel>,
    },
    /// A label that does not convert to grams; sorted as weight 0
    UnparsableFraction { category: String, label: FractionLabel },
    /// A product fraction that could not be priced; the cell stays blank
    UnpriceableFraction {
        category: String,
        product: String,
        label: FractionLabel,
    },
    /// A KG product without any fraction configured
    MissingFractions { category: String, product: String },
}

impl Diagnostic {
    /// Log and collect
    pub fn emit(self, sink: &mut Vec<Diagnostic>) {
        tracing::warn!("{}", self);
        sink.push(self);
    }

    pub fn category(&self) -> &str {
        match self {
            Self::CapacityExceeded { category, .. }
            | Self::UnparsableFraction { category, .. }
            | Self::UnpriceableFraction { category, .. }
            | Self::MissingFractions { category, .. } => category,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                category,
                product,
                allowed,
                dropped,
            } => {
                let dropped = FractionLabel::join(dropped);
                match product {
                    Some(product) => write!(
                        f,
                        "Product '{}' (category '{}') has more than {} fractions, dropped: {}",
                        product, category, allowed, dropped
                    ),
                    None => write!(
                        f,
                        "Category '{}' has more than {} fractions, dropped: {}",
                        category, allowed, dropped
                    ),
                }
            }
            Self::UnparsableFraction { category, label } => write!(
                f,
                "Category '{}' has fraction '{}' that is not a weight",
                category, label
            ),
            Self::UnpriceableFraction {
                category,
                product,
                label,
            } => write!(
                f,
                "Product '{}' (category '{}') cannot be priced for fraction '{}'",
                product, category, label
            ),
            Self::MissingFractions { category, product } => write!(
                f,
                "Product '{}' (category '{}') has no fractions",
                product, category
            ),
        }
    }
}
