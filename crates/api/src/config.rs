//! Process configuration, resolved once from the environment at startup.

use std::fmt;

use depot_store::StoreConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Environment-backed settings. Keys are the lowercased variable names,
/// e.g. `GITHUB_REPO` populates `github_repo`.
///
/// Variables are read without a prefix, so `HOST` and `PORT` are the generic
/// ones. Some shells (zsh) export `HOST` as the machine name; set it explicitly
/// when the server must listen on a particular address.
#[derive(Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub github_token: Option<String>,
    pub github_account: String,
    pub github_repo: String,
    #[serde(default = "default_branch")]
    pub github_branch: String,
    #[serde(default)]
    pub github_api_url: Option<String>,
    #[serde(default)]
    pub github_raw_url: Option<String>,
    pub api_secret: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_branch() -> String {
    depot_store::config::DEFAULT_BRANCH.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Settings {
    /// Read settings from the process environment
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_environment(config::Environment::default())
    }

    /// Read settings from an explicit set of variables instead of the process environment
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(config::Environment::default().source(Some(map)))
    }

    fn from_environment(environment: config::Environment) -> Result<Self, SettingsError> {
        let settings: Settings = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("GITHUB_ACCOUNT", &self.github_account),
            ("GITHUB_REPO", &self.github_repo),
            ("GITHUB_BRANCH", &self.github_branch),
            ("API_SECRET", &self.api_secret),
        ] {
            if value.trim().is_empty() {
                return Err(SettingsError::Invalid(format!("{} cannot be empty", name)));
            }
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_config(&self) -> StoreConfig {
        let mut config = StoreConfig::new(self.github_account.clone(), self.github_repo.clone())
            .branch(self.github_branch.clone());

        if let Some(token) = &self.github_token {
            config = config.token(token.clone());
        }
        if let Some(url) = &self.github_api_url {
            config = config.api_url(url.clone());
        }
        if let Some(url) = &self.github_raw_url {
            config = config.raw_url(url.clone());
        }

        config
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("github_account", &self.github_account)
            .field("github_repo", &self.github_repo)
            .field("github_branch", &self.github_branch)
            .field("github_api_url", &self.github_api_url)
            .field("github_raw_url", &self.github_raw_url)
            .field("api_secret", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
