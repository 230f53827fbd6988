//! Router assembly and shared handler state

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use depot_store::{FileStorage, StoreConfig};

use crate::auth::{AccessState, require_secret};
use crate::routes::{files, health};

/// Repository coordinates reported by `/status`. Never holds credentials.
#[derive(Debug, Clone)]
pub struct RepositoryInfo {
    pub account: String,
    pub repository: String,
    pub branch: String,
}

impl From<&StoreConfig> for RepositoryInfo {
    fn from(config: &StoreConfig) -> Self {
        Self {
            account: config.account().to_string(),
            repository: config.repository().to_string(),
            branch: config.branch_name().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FileStorage>,
    pub repository: Arc<RepositoryInfo>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn FileStorage>, repository: RepositoryInfo) -> Self {
        Self {
            store,
            repository: Arc::new(repository),
            started_at: Instant::now(),
        }
    }
}

/// Build the full router: gated file routes plus open diagnostics.
pub fn router(state: AppState, access: AccessState) -> Router {
    let file_routes = Router::new()
        .route(
            "/data/{*path}",
            get(files::read_file)
                .head(files::probe_file)
                .post(files::create_file)
                .put(files::update_file)
                .delete(files::delete_file),
        )
        .route("/raw/{*path}", get(files::read_raw))
        .layer(axum::middleware::from_fn_with_state(access, require_secret));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/status", get(health::status))
        .merge(file_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
