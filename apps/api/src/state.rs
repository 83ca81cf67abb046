use crate::config::Config;
use crate::db::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
}
