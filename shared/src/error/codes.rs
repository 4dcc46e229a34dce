//! Unified error codes for the catalog back office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, categories, fractions, SKUs)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive a trip
/// through JSON or a spreadsheet cell unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Required field missing
    RequiredField = 7,

    // ==================== 60xx: Product ====================
    /// Product row not found
    ProductNotFound = 6001,
    /// Sale type is neither KG nor UNIDAD
    InvalidUnitType = 6002,
    /// Stock cell could not be read
    InvalidStock = 6003,
    /// Price cell could not be read
    InvalidPrice = 6004,

    // ==================== 61xx: Category ====================
    /// Category not found
    CategoryNotFound = 6101,
    /// Category order is not a permutation of the current categories
    InvalidCategoryOrder = 6102,
    /// Category has no products sold by weight
    NoWeightProducts = 6103,

    // ==================== 62xx: Fraction ====================
    /// Fraction label could not be converted to grams
    MalformedFraction = 6201,
    /// More fractions than the category can lay out
    CapacityExceeded = 6202,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Filesystem error
    IoError = 9002,
    /// Serialization error
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::RequiredField => "Required field is missing",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::InvalidUnitType => "Sale type must be KG or UNIDAD",
            ErrorCode::InvalidStock => "Stock value is not valid",
            ErrorCode::InvalidPrice => "Price value is not valid",

            // Category
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::InvalidCategoryOrder => "Category order must list every category once",
            ErrorCode::NoWeightProducts => "Category has no products sold by weight",

            // Fraction
            ErrorCode::MalformedFraction => "Fraction label is not valid",
            ErrorCode::CapacityExceeded => "Too many fractions for this category",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::IoError => "Filesystem error",
            ErrorCode::SerializationError => "Serialization error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            7 => Ok(ErrorCode::RequiredField),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::InvalidUnitType),
            6003 => Ok(ErrorCode::InvalidStock),
            6004 => Ok(ErrorCode::InvalidPrice),

            // Category
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::InvalidCategoryOrder),
            6103 => Ok(ErrorCode::NoWeightProducts),

            // Fraction
            6201 => Ok(ErrorCode::MalformedFraction),
            6202 => Ok(ErrorCode::CapacityExceeded),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::IoError),
            9003 => Ok(ErrorCode::SerializationError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
