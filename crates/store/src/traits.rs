use async_trait::async_trait;

use crate::models::{ContentKind, FileContent, FileRecord};

/// Path-addressed file operations against a single repository branch.
///
/// Implementations never surface errors: every failure (missing file, rejected
/// credentials, network fault, undecodable body) is logged and reported as
/// `false` or `None`, so callers can map "did not succeed" to one response.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Whether `path` currently exists upstream
    async fn exist(&self, path: &str) -> bool;

    /// Structured read with metadata and revision token
    async fn get(&self, path: &str, kind: ContentKind) -> Option<FileRecord>;

    /// Raw read of the file body only
    async fn raw(&self, path: &str, kind: ContentKind) -> Option<FileContent>;

    /// Create a new file. Fails if upstream already has one at `path`.
    async fn create(&self, path: &str, data: &str) -> bool;

    /// Overwrite `path` at revision `sha`, resolving the current revision when absent
    async fn commit(&self, path: &str, data: &[u8], sha: Option<&str>) -> bool;

    /// Remove `path` at revision `sha`, resolving the current revision when absent
    async fn delete(&self, path: &str, sha: Option<&str>) -> bool;
}
