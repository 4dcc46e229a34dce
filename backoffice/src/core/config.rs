use crate::sku::CategoryCodePolicy;

/// Back-office configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_PATH | catalog.json | JSON row store |
/// | BACKUP_DIR | backups | backup directory |
/// | PRICE_LIST_TITLE | LISTA DE PRECIOS | price list title |
/// | CATEGORY_CODE_POLICY | shared | `shared` or `suffixed` |
/// | LOG_LEVEL | info | max log level |
/// | LOG_DIR | (unset) | daily rolling log files when set |
///
/// # Example
///
/// ```ignore
/// CATALOG_PATH=/data/catalog.json CATEGORY_CODE_POLICY=suffixed cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the catalog rows
    pub catalog_path: String,
    pub backup_dir: String,
    pub price_list_title: String,
    /// How exhausted category codes are resolved
    pub category_code_policy: CategoryCodePolicy,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.json".into()),
            backup_dir: std::env::var("BACKUP_DIR").unwrap_or_else(|_| "backups".into()),
            price_list_title: std::env::var("PRICE_LIST_TITLE")
                .unwrap_or_else(|_| "LISTA DE PRECIOS".into()),
            category_code_policy: std::env::var("CATEGORY_CODE_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        }
    }
}
