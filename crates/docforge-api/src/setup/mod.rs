//! Application setup and initialization
//!
//! Initialization logic lives here instead of main.rs so integration tests
//! can assemble the same router against temporary state.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use docforge_core::Config;
use docforge_storage::LocalStorage;
use docforge_store::MemoryStore;
use std::sync::Arc;

/// Initialize storage, the document store, and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let storage = LocalStorage::new(&config.storage_path, config.storage_base_url.clone())
        .await
        .context("Failed to initialize local storage")?;

    let state = Arc::new(AppState {
        config: config.clone(),
        store: Arc::new(MemoryStore::new()),
        storage: Arc::new(storage),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
