//! Timestamped catalog backups
//!
//! Each backup is `backup_YYYYMMDD_HHMMSS.json` inside the backup directory.

use shared::error::AppResult;
use shared::CatalogRow;
use std::path::{Path, PathBuf};

const PREFIX: &str = "backup_";
const EXTENSION: &str = "json";

/// Write `rows` to a new backup file; returns its path
///
/// The directory is created when missing.
pub fn save_backup(rows: &[CatalogRow], dir: impl AsRef<Path>) -> AppResult<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}{}.{}", PREFIX, timestamp, EXTENSION));
    std::fs::write(&path, serde_json::to_string_pretty(rows)?)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Backup written");
    Ok(path)
}

/// Backup file names in `dir`, oldest first
pub fn list_backups(dir: impl AsRef<Path>) -> AppResult<Vec<String>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(PREFIX) && name.ends_with(&format!(".{}", EXTENSION)) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Read a backup back into rows
pub fn load_backup(path: impl AsRef<Path>) -> AppResult<Vec<CatalogRow>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
