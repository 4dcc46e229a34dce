//! SKU derivation
//!
//! A SKU token is `{category code}-{product type code}-{fraction code}`,
//! one token per fraction, comma-joined into the record's SKU field.
//! All state lives in a [`SkuRegistry`] owned by the editing session.

pub mod deriver;
pub mod registry;

pub use deriver::{category_code, derive, fraction_code, product_type_code};
pub use registry::SkuRegistry;

use serde::{Deserialize, Serialize};
use shared::error::AppError;
use std::fmt;
use std::str::FromStr;

/// What to do when a category name is exhausted without a free code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryCodePolicy {
    /// Reuse the full name even if another category owns it
    #[default]
    Shared,
    /// Append the first free numeric suffix (`NAME1`, `NAME2`, ...)
    Suffixed,
}

impl CategoryCodePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Suffixed => "suffixed",
        }
    }
}

impl fmt::Display for CategoryCodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryCodePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "suffixed" => Ok(Self::Suffixed),
            other => Err(AppError::validation(format!(
                "Unknown category code policy '{}'",
                other
            ))),
        }
    }
}

/// Non-fatal finding of the deriver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkuNotice {
    /// Two categories now share one code
    DuplicateCategoryCode {
        category: String,
        code: String,
        shared_with: String,
    },
}

impl fmt::Display for SkuNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCategoryCode {
                category,
                code,
                shared_with,
            } => write!(
                f,
                "Category '{}' shares code '{}' with category '{}'",
                category, code, shared_with
            ),
        }
    }
}
