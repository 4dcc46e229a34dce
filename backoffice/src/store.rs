//! Catalog store
//!
//! The tabular source/sink the catalog is loaded from and written back to.
//! [`JsonFileStore`] keeps the rows as a JSON array on disk;
//! [`MemoryStore`] is used by tests.

use shared::error::{AppError, AppResult};
use shared::CatalogRow;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub trait CatalogStore: Send + Sync {
    fn load(&self) -> AppResult<Vec<CatalogRow>>;
    fn save(&self, rows: &[CatalogRow]) -> AppResult<()>;
}

/// Rows stored as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonFileStore {
    /// A missing file is an empty catalog
    fn load(&self) -> AppResult<Vec<CatalogRow>> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "Catalog file not found, starting empty");
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let rows: Vec<CatalogRow> = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Catalog loaded");
        Ok(rows)
    }

    /// Writes to a sibling temp file first, then renames over the target
    fn save(&self, rows: &[CatalogRow]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(rows)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Catalog saved");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<Mutex<Vec<CatalogRow>>>,
}

impl MemoryStore {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
        }
    }
}

impl CatalogStore for MemoryStore {
    fn load(&self) -> AppResult<Vec<CatalogRow>> {
        let rows = self
            .rows
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))?;
        Ok(rows.clone())
    }

    fn save(&self, rows: &[CatalogRow]) -> AppResult<()> {
        let mut stored = self
            .rows
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))?;
        *stored = rows.to_vec();
        Ok(())
    }
}

/// Save `rows` on the blocking pool without waiting for it
///
/// Failures are logged and never reach the editing session.
pub fn spawn_persist<S>(store: Arc<S>, rows: Vec<CatalogRow>) -> JoinHandle<()>
where
    S: CatalogStore + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || {
        let count = rows.len();
        match store.save(&rows) {
            Ok(()) => tracing::info!(rows = count, "Catalog persisted"),
            Err(e) => tracing::error!(error = %e, code = %e.code, "Failed to persist catalog"),
        }
    })
}
