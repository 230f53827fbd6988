//! Depot Store - path-addressed file storage backed by a repository's contents API
//!
//! This crate turns file operations (exist, read, create, update, delete) into
//! calls against the GitHub contents API and its raw-content mirror, for exactly
//! one repository and branch.
//!
//! # Features
//!
//! - **Two read paths**: structured reads with metadata and revision token, or
//!   raw reads straight from the mirror
//! - **Revision tokens**: updates and deletes fetch the current `sha` when the
//!   caller does not hold one
//! - **Total operations**: failures are logged and reported as `false`/`None`
//!
//! # Examples
//!
//! ```rust,no_run
//! use depot_store::{ContentKind, FileStorage, FileStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::new("octocat", "notes").token("ghp_example");
//! let store = FileStore::new(&config)?;
//!
//! if store.create("inbox/today.md", "- buy milk\n").await {
//!     let record = store.get("inbox/today.md", ContentKind::Text).await;
//!     println!("{:?}", record.map(|r| r.sha));
//! }
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod models;
pub mod store;
pub mod traits;

pub use client::ContentsClient;
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use models::{ContentKind, FileContent, FileRecord};
pub use store::FileStore;
pub use traits::FileStorage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
