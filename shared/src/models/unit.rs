//! Sale unit and stock markers

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a product is priced and sold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// Priced per kilogram, sold in fractional packages ("KG")
    #[serde(rename = "KG")]
    ByWeight,
    /// Priced and sold per discrete unit ("UNIDAD")
    #[serde(rename = "UNIDAD")]
    ByUnit,
}

impl UnitType {
    /// Sheet literal for this sale type
    pub const fn as_str(&self) -> &'static str {
        match self {
            UnitType::ByWeight => "KG",
            UnitType::ByUnit => "UNIDAD",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = AppError;

    /// An empty cell reads as `UNIDAD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_uppercase();
        match value.as_str() {
            "KG" => Ok(UnitType::ByWeight),
            "UNIDAD" | "" => Ok(UnitType::ByUnit),
            _ => Err(AppError::with_message(
                ErrorCode::InvalidUnitType,
                format!("'{}' is not a sale type (expected KG or UNIDAD)", s.trim()),
            )
            .with_detail("value", s.trim())),
        }
    }
}

/// Stock marker of a product row
///
/// Sheet encoding: `-` (or empty) is unlimited, `0` is out of stock,
/// any other non-negative integer is a counted stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StockIndicator {
    #[default]
    Unlimited,
    OutOfStock,
    Numeric(u32),
}

impl StockIndicator {
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, StockIndicator::OutOfStock)
    }
}

impl fmt::Display for StockIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockIndicator::Unlimited => f.write_str("-"),
            StockIndicator::OutOfStock => f.write_str("0"),
            StockIndicator::Numeric(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for StockIndicator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value {
            "" | "-" => Ok(StockIndicator::Unlimited),
            "0" => Ok(StockIndicator::OutOfStock),
            _ => match value.parse::<u32>() {
                Ok(0) => Ok(StockIndicator::OutOfStock),
                Ok(n) => Ok(StockIndicator::Numeric(n)),
                Err(_) => Err(AppError::with_message(
                    ErrorCode::InvalidStock,
                    format!("'{}' is not a stock value", value),
                )
                .with_detail("value", value)),
            },
        }
    }
}

impl From<StockIndicator> for String {
    fn from(stock: StockIndicator) -> Self {
        stock.to_string()
    }
}

impl TryFrom<String> for StockIndicator {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
