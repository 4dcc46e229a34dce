//! Data models
//!
//! Typed rendering of the catalog sheet. The engine crate works on these
//! types; sheet rows only appear at the store boundary.

pub mod catalog_record;
pub mod fraction;
pub mod unit;

// Re-exports
pub use catalog_record::*;
pub use fraction::*;
pub use unit::*;
