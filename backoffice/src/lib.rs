//! Back-office catalog engine
//!
//! Pricing, price-list layout and SKU generation for a food-retail catalog
//! whose products are sold by weight (KG) in fractional packages or per
//! unit (UNIDAD).
//!
//! # Module layout
//!
//! ```text
//! backoffice/src/
//! ├── core/       # configuration
//! ├── utils/      # logging
//! ├── pricing/    # unit conversion, fraction prices
//! ├── layout/     # category layout planner, price-list grid
//! ├── sku/        # SKU deriver and registry
//! ├── catalog/    # editing session
//! ├── store.rs    # catalog source/sink
//! └── backup.rs   # timestamped backups
//! ```

pub mod backup;
pub mod catalog;
pub mod core;
pub mod layout;
pub mod pricing;
pub mod sku;
pub mod store;
pub mod utils;

pub use catalog::{CatalogSession, NewProduct, ProductUpdate};
pub use core::Config;
pub use layout::{Diagnostic, PriceList};
pub use pricing::{PricingError, price_for_fraction, to_grams};
pub use sku::{CategoryCodePolicy, SkuNotice, SkuRegistry};
pub use store::{CatalogStore, JsonFileStore, MemoryStore, spawn_persist};

pub use shared::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env` and initialize logging from the environment
pub fn setup_environment() -> Config {
    // Missing .env is fine
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
