//! Application state shared by all handlers.

use docforge_core::Config;
use docforge_storage::Storage;
use docforge_store::DocumentStore;
use std::sync::Arc;

/// Shared state: configuration plus the two external collaborators the
/// pipeline is written against (record store and byte storage).
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub storage: Arc<dyn Storage>,
}
