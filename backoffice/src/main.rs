use backoffice::{CatalogSession, CatalogStore, JsonFileStore, backup, setup_environment, spawn_persist};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging) and configuration
    let config = setup_environment();

    tracing::info!(catalog = %config.catalog_path, "Back office starting...");

    // 2. Load the catalog and open a session
    let store = Arc::new(JsonFileStore::new(&config.catalog_path));
    let rows = store.load()?;
    let mut session = CatalogSession::from_rows(&rows, config.category_code_policy)?;

    // 3. Fill in SKUs for rows that have none
    session.assign_missing_skus();
    for notice in session.take_sku_notices() {
        tracing::warn!("{}", notice);
    }

    // 4. Price list
    let price_list = session.price_list(&config.price_list_title);
    println!("{}", price_list.title);
    for row in price_list.rendered_rows() {
        println!("{}", row.join("\t"));
    }
    if !price_list.diagnostics.is_empty() {
        tracing::warn!(count = price_list.diagnostics.len(), "Price list has diagnostics");
    }

    // 5. Backup, then persist in the background
    let snapshot = session.snapshot_rows();
    backup::save_backup(&snapshot, &config.backup_dir)?;

    if let Err(e) = spawn_persist(store, snapshot).await {
        tracing::error!("Persist task failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
