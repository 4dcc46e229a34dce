//! Error type carried across the catalog engine

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending column, row index, label, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required field error naming the missing field
    pub fn required(field: impl Into<String>) -> Self {
        let f = field.into();
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", f))
            .with_detail("field", f)
    }

    /// Create a product not found error for a row index
    pub fn product_not_found(index: usize) -> Self {
        Self::with_message(
            ErrorCode::ProductNotFound,
            format!("No product at row {}", index),
        )
        .with_detail("index", index)
    }

    /// Create a category not found error
    pub fn category_not_found(category: impl Into<String>) -> Self {
        let c = category.into();
        Self::with_message(
            ErrorCode::CategoryNotFound,
            format!("Category '{}' not found", c),
        )
        .with_detail("category", c)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_message(ErrorCode::IoError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_message(ErrorCode::SerializationError, err.to_string())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NoWeightProducts);
        assert_eq!(err.code, ErrorCode::NoWeightProducts);
        assert_eq!(err.message, "Category has no products sold by weight");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::with_message(ErrorCode::MalformedFraction, "bad label")
            .with_detail("label", "abc")
            .with_detail("category", "FRUTOS SECOS");

        let details = err.details.unwrap();
        assert_eq!(details.get("label").unwrap(), "abc");
        assert_eq!(details.get("category").unwrap(), "FRUTOS SECOS");
    }

    #[test]
    fn test_app_error_convenience_constructors() {
        let err = AppError::required("PRODUCTO");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "PRODUCTO is required");

        let err = AppError::product_not_found(12);
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.details.unwrap().get("index").unwrap(), 12);

        let err = AppError::category_not_found("LACTEOS");
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
        assert_eq!(err.message, "Category 'LACTEOS' not found");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::validation("Product name is empty");
        assert_eq!(format!("{}", err), "Product name is empty");
    }
}
