//! Repository-backed file store
//!
//! [`FileStore`] is the boundary between the HTTP layer and the upstream
//! contents API. Each operation performs one or two upstream calls through
//! [`ContentsClient`]; writes that need a revision token and were not given one
//! resolve it with a read that completes before the write is issued.

use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use tracing::{debug, error};

use crate::client::ContentsClient;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::message::{create_message, delete_message, update_message};
use crate::models::{
    ContentKind, CreateRequest, DeleteRequest, FileContent, FileRecord, UpdateRequest,
};
use crate::traits::FileStorage;

#[derive(Debug, Clone)]
pub struct FileStore {
    client: ContentsClient,
}

impl FileStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        Ok(Self::with_client(ContentsClient::new(config)?))
    }

    pub fn with_client(client: ContentsClient) -> Self {
        Self { client }
    }

    /// Current revision token of `path`, fetched fresh from upstream.
    ///
    /// Reads in binary mode so the lookup works for files that are not UTF-8.
    pub async fn resolve_revision(&self, path: &str) -> Option<String> {
        match self.client.fetch_record(path, ContentKind::Binary).await {
            Ok(record) => Some(record.sha),
            Err(e) => {
                report("resolve_revision", path, &e);
                None
            }
        }
    }

    async fn revision_or_resolve(&self, path: &str, sha: Option<&str>) -> Option<String> {
        match sha {
            Some(sha) => Some(sha.to_string()),
            None => self.resolve_revision(path).await,
        }
    }
}

#[async_trait]
impl FileStorage for FileStore {
    async fn exist(&self, path: &str) -> bool {
        match self.client.probe(path).await {
            Ok(()) => true,
            Err(e) => {
                report("exist", path, &e);
                false
            }
        }
    }

    async fn get(&self, path: &str, kind: ContentKind) -> Option<FileRecord> {
        self.client
            .fetch_record(path, kind)
            .await
            .map_err(|e| report("get", path, &e))
            .ok()
    }

    async fn raw(&self, path: &str, kind: ContentKind) -> Option<FileContent> {
        self.client
            .fetch_raw(path, kind)
            .await
            .map_err(|e| report("raw", path, &e))
            .ok()
    }

    async fn create(&self, path: &str, data: &str) -> bool {
        let body = CreateRequest {
            message: create_message(Utc::now()),
            content: encode(data.as_bytes()),
            branch: self.client.branch().to_string(),
        };

        match self.client.put(path, &body).await {
            Ok(()) => {
                debug!("Created {}", path);
                true
            }
            Err(e) => {
                report("create", path, &e);
                false
            }
        }
    }

    async fn commit(&self, path: &str, data: &[u8], sha: Option<&str>) -> bool {
        let content = encode(data);

        let Some(sha) = self.revision_or_resolve(path, sha).await else {
            debug!("Commit to {} aborted: no revision token", path);
            return false;
        };

        let body = UpdateRequest {
            message: update_message(path, Utc::now()),
            content,
            sha,
            branch: self.client.branch().to_string(),
        };

        match self.client.put(path, &body).await {
            Ok(()) => {
                debug!("Committed {}", path);
                true
            }
            Err(e) => {
                report("commit", path, &e);
                false
            }
        }
    }

    async fn delete(&self, path: &str, sha: Option<&str>) -> bool {
        let Some(sha) = self.revision_or_resolve(path, sha).await else {
            debug!("Delete of {} aborted: no revision token", path);
            return false;
        };

        let body = DeleteRequest {
            message: delete_message(path, Utc::now()),
            sha,
            branch: self.client.branch().to_string(),
        };

        match self.client.delete(path, &body).await {
            Ok(()) => {
                debug!("Deleted {}", path);
                true
            }
            Err(e) => {
                report("delete", path, &e);
                false
            }
        }
    }
}

fn encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

/// Emit the single error event for a failed operation.
fn report(operation: &str, path: &str, err: &StoreError) {
    let cause = err.cause().unwrap_or(path);
    match err {
        StoreError::Status { status, reason, .. } => error!(
            operation,
            path,
            cause,
            ok = false,
            status = *status,
            status_text = %reason,
            "Upstream request did not succeed"
        ),
        other => error!(operation, path, cause, error = %other, "Upstream request failed"),
    }
}
