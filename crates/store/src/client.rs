//! HTTP transport for the contents API and the raw mirror
//!
//! Centralizes URL construction, the authorization header and response decoding.
//! Every call returns a [`Result`]; turning failures into log events is left to
//! [`FileStore`](crate::store::FileStore).

use std::time::Duration;

use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::models::{ContentKind, ContentsEntry, DeleteRequest, FileContent, FileRecord};

pub const USER_AGENT: &str = concat!("depot-store/", env!("CARGO_PKG_VERSION"));
pub const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ContentsClient {
    client: Client,
    contents_base: Url,
    raw_base: Url,
    branch: String,
}

impl ContentsClient {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = create_client(config.access_token())?;

        Ok(Self {
            client,
            contents_base: config.contents_base()?,
            raw_base: config.raw_base()?,
            branch: config.branch_name().to_string(),
        })
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Contents endpoint for `path`, without the branch query
    pub fn contents_url(&self, path: &str) -> Result<Url> {
        join_path(&self.contents_base, path)
    }

    /// Contents endpoint for reads, pinned to the configured branch
    pub fn contents_read_url(&self, path: &str) -> Result<Url> {
        let mut url = self.contents_url(path)?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    pub fn raw_url(&self, path: &str) -> Result<Url> {
        join_path(&self.raw_base, path)
    }

    /// Metadata fetch whose only outcome of interest is success
    pub async fn probe(&self, path: &str) -> Result<()> {
        let url = self.contents_read_url(path)?;
        debug!("Probing contents entry: {}", url);

        self.get_contents(&url).await.map(|_| ())
    }

    /// Structured read, content base64-decoded into `kind`
    pub async fn fetch_record(&self, path: &str, kind: ContentKind) -> Result<FileRecord> {
        let url = self.contents_read_url(path)?;
        debug!("Fetching contents entry: {}", url);

        let response = self.get_contents(&url).await?;
        let body = read_body(&url, response).await?;
        let entry: ContentsEntry = serde_json::from_slice(&body)
            .map_err(|e| StoreError::decode(url.as_str(), format!("invalid contents body: {}", e)))?;

        let bytes = decode_entry_content(&url, &entry)?;
        let content = FileContent::decode(bytes, kind)
            .map_err(|e| StoreError::decode(url.as_str(), format!("content is not UTF-8: {}", e)))?;

        Ok(entry.into_record(content))
    }

    /// Read through the raw mirror, no metadata and no base64 layer
    pub async fn fetch_raw(&self, path: &str, kind: ContentKind) -> Result<FileContent> {
        let url = self.raw_url(path)?;
        debug!("Fetching raw file: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| network(&url, source))?;
        let response = check_status(&url, response)?;
        let bytes = read_body(&url, response).await?;

        FileContent::decode(bytes, kind)
            .map_err(|e| StoreError::decode(url.as_str(), format!("content is not UTF-8: {}", e)))
    }

    /// PUT a create or update body to the contents endpoint
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.contents_url(path)?;
        debug!("Writing contents entry: {}", url);

        let response = self
            .client
            .put(url.clone())
            .header(ACCEPT, ACCEPT_HEADER)
            .json(body)
            .send()
            .await
            .map_err(|source| network(&url, source))?;

        check_status(&url, response).map(|_| ())
    }

    pub async fn delete(&self, path: &str, body: &DeleteRequest) -> Result<()> {
        let url = self.contents_url(path)?;
        debug!("Deleting contents entry: {}", url);

        let response = self
            .client
            .delete(url.clone())
            .header(ACCEPT, ACCEPT_HEADER)
            .json(body)
            .send()
            .await
            .map_err(|source| network(&url, source))?;

        check_status(&url, response).map(|_| ())
    }

    async fn get_contents(&self, url: &Url) -> Result<Response> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, ACCEPT_HEADER)
            .send()
            .await
            .map_err(|source| network(url, source))?;

        check_status(url, response)
    }
}

/// Create an HTTP client carrying the bearer credential, if any, on every request
fn create_client(token: Option<&str>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            StoreError::InvalidConfiguration("Access token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .map_err(|e| StoreError::InvalidConfiguration(format!("Failed to create HTTP client: {}", e)))
}

fn join_path(base: &Url, path: &str) -> Result<Url> {
    let clean_path = path.trim_start_matches('/');
    if clean_path.is_empty() {
        return Err(StoreError::InvalidPath("path cannot be empty".to_string()));
    }

    let segments: Vec<&str> = clean_path.split('/').collect();
    if segments
        .iter()
        .any(|s| s.is_empty() || *s == "." || *s == "..")
    {
        return Err(StoreError::InvalidPath(format!(
            "'{}' contains an empty or relative segment",
            path
        )));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| StoreError::InvalidPath(format!("cannot append '{}' to {}", path, base)))?
        .extend(segments);
    Ok(url)
}

fn check_status(url: &Url, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(StoreError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
    })
}

async fn read_body(url: &Url, response: Response) -> Result<Vec<u8>> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|source| network(url, source))
}

fn network(url: &Url, source: reqwest::Error) -> StoreError {
    StoreError::Network {
        url: url.to_string(),
        source,
    }
}

/// Decode the base64 `content` field; upstream wraps it at 60 columns.
fn decode_entry_content(url: &Url, entry: &ContentsEntry) -> Result<Vec<u8>> {
    if let Some(encoding) = entry.encoding.as_deref() {
        if encoding != "base64" {
            return Err(StoreError::decode(
                url.as_str(),
                format!("unsupported content encoding '{}'", encoding),
            ));
        }
    }

    let content = entry
        .content
        .as_deref()
        .ok_or_else(|| StoreError::decode(url.as_str(), "entry has no content field"))?;

    let compact: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| StoreError::decode(url.as_str(), format!("invalid base64 content: {}", e)))
}
