//! HTTP façade over a repository-backed file store.
//!
//! `/data/*` and `/raw/*` are guarded by a shared secret in the `x-api-key`
//! header; `/`, `/health` and `/status` are open.

pub mod app;
pub mod auth;
pub mod config;
pub mod routes;

pub use app::{AppState, RepositoryInfo, router};
pub use auth::{API_KEY_HEADER, AccessState};
pub use config::Settings;
