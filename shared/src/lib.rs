//! Shared types for the catalog back office
//!
//! The typed catalog model (records, sale units, stock markers, fraction
//! labels, sheet row codec) and the unified error system used by the engine.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CatalogRecord, CatalogRow, FractionLabel, StockIndicator, UnitType};
pub use serde::{Deserialize, Serialize};
