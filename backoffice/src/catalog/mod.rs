//! Catalog editing
//!
//! - [`CatalogSession`] - explicit context object for one editing session
//! - [`NewProduct`] / [`ProductUpdate`] - operation inputs

pub mod session;

pub use session::{CatalogSession, NewProduct, ProductUpdate};
