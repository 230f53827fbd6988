//! Repository coordinates and credentials for the backing store.
//!
//! A [`StoreConfig`] is resolved once at startup and handed to
//! [`ContentsClient::new`](crate::client::ContentsClient::new). Nothing in the
//! store reads the process environment.

use std::fmt;

use url::Url;

use crate::error::{Result, StoreError};

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

#[derive(Clone)]
pub struct StoreConfig {
    token: Option<String>,
    account: String,
    repository: String,
    branch: String,
    api_url: String,
    raw_url: String,
}

impl StoreConfig {
    pub fn new(account: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            token: None,
            account: account.into(),
            repository: repository.into(),
            branch: DEFAULT_BRANCH.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
        }
    }

    /// Set the access token sent as a bearer credential on every call
    pub fn token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Point the contents API at a different host (GitHub Enterprise, test doubles)
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Point the raw mirror at a different host
    pub fn raw_url(mut self, url: impl Into<String>) -> Self {
        self.raw_url = url.into();
        self
    }

    pub fn access_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn branch_name(&self) -> &str {
        &self.branch
    }

    /// `{api}/repos/{account}/{repository}/contents`
    pub fn contents_base(&self) -> Result<Url> {
        self.validate()?;
        join_segments(
            &self.api_url,
            &["repos", &self.account, &self.repository, "contents"],
        )
    }

    /// `{raw}/{account}/{repository}/{branch}`
    pub fn raw_base(&self) -> Result<Url> {
        self.validate()?;
        join_segments(
            &self.raw_url,
            &[&self.account, &self.repository, &self.branch],
        )
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("account", &self.account),
            ("repository", &self.repository),
            ("branch", &self.branch),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::InvalidConfiguration(format!(
                    "{} cannot be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("account", &self.account)
            .field("repository", &self.repository)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .finish()
    }
}

fn join_segments(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        StoreError::InvalidConfiguration(format!("Invalid base URL '{}': {}", base, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            StoreError::InvalidConfiguration(format!("Base URL '{}' cannot hold a path", base))
        })?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
