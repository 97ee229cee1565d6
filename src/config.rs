//! Configuration types for tweet-capture
//!
//! The configuration is a JSON document with two required top-level sections:
//!
//! ```json
//! {
//!   "oauth": {
//!     "app": { "consumer_key": "...", "consumer_secret": "..." },
//!     "account": { "access_token": "...", "access_token_secret": "..." }
//!   },
//!   "settings": { "directory": "out", "prefix": "run_", "timeout": 2000 }
//! }
//! ```
//!
//! Missing sections are an error. Missing or wrongly-typed leaves fall back to
//! their defaults (empty string, [`DEFAULT_TIMEOUT_MS`]).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file used when none is given on the command line (or it cannot be opened)
pub const DEFAULT_CONFIG: &str = "config.json";

/// Capture window used when `settings.timeout` is missing or not a positive integer
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Streaming endpoint captured when `settings.endpoint` is not set
pub const DEFAULT_ENDPOINT: &str = "https://stream.twitter.com/1.1/statuses/sample.json";

/// User agent sent when `settings.user_agent` is not set
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// OAuth 1.0a credentials for one app acting on behalf of one account
///
/// An empty string means the value was absent from the config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    /// App consumer key (API key)
    pub consumer_key: String,
    /// App consumer secret (API secret)
    pub consumer_secret: String,
    /// Account access token
    pub access_token: String,
    /// Account access token secret
    pub access_token_secret: String,
}

/// Where the capture is written and how long it runs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputSettings {
    /// Output directory, created if missing (default: "", the working directory)
    pub directory: String,

    /// File name prefix placed before the timestamp (default: "")
    pub prefix: String,

    /// Capture window in milliseconds, always > 0 (default: 5000)
    pub timeout_ms: u64,

    /// Streaming endpoint to capture (default: the public sample stream)
    pub endpoint: String,

    /// User agent header value (default: "tweet-capture/<version>")
    pub user_agent: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: String::new(),
            prefix: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl OutputSettings {
    /// The capture window as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Everything a capture run needs, loaded once at startup
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Signing credentials
    pub credentials: Credentials,
    /// Output and capture settings
    pub settings: OutputSettings,
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read '{}': {e}", path.display())))?;

        let config = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            directory = %config.settings.directory,
            prefix = %config.settings.prefix,
            timeout_ms = config.settings.timeout_ms,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse the configuration from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_str(content)?;

        for (pointer, key) in [
            ("/oauth/app", "oauth.app"),
            ("/oauth/account", "oauth.account"),
            ("/settings", "settings"),
        ] {
            if !document.pointer(pointer).is_some_and(|v| v.is_object()) {
                return Err(Error::Config {
                    message: format!("missing required section '{key}'"),
                    key: Some(key.to_string()),
                });
            }
        }

        let file: ConfigFile = serde_json::from_value(document)?;
        Ok(file.into())
    }
}

/// Pick the config file to load
///
/// The command-line path wins if it can be opened; otherwise [`DEFAULT_CONFIG`]
/// in the working directory is tried.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Result<PathBuf> {
    resolve_config_path_with(cli_path, Path::new(DEFAULT_CONFIG))
}

/// Same as [`resolve_config_path`] with an explicit fallback file
pub fn resolve_config_path_with(cli_path: Option<&Path>, fallback: &Path) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        if std::fs::File::open(path).is_ok() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(
            path = %path.display(),
            fallback = %fallback.display(),
            "config file cannot be opened, trying fallback"
        );
    }

    if std::fs::File::open(fallback).is_ok() {
        return Ok(fallback.to_path_buf());
    }

    Err(Error::config(format!(
        "no valid config file found; create '{}' or pass the path as an argument",
        fallback.display()
    )))
}

// On-disk document shape

#[derive(Deserialize)]
struct ConfigFile {
    oauth: OAuthSection,
    settings: SettingsSection,
}

#[derive(Deserialize)]
struct OAuthSection {
    app: AppSection,
    account: AccountSection,
}

#[derive(Deserialize)]
struct AppSection {
    #[serde(default, deserialize_with = "lenient::string")]
    consumer_key: String,
    #[serde(default, deserialize_with = "lenient::string")]
    consumer_secret: String,
}

#[derive(Deserialize)]
struct AccountSection {
    #[serde(default, deserialize_with = "lenient::string")]
    access_token: String,
    #[serde(default, deserialize_with = "lenient::string")]
    access_token_secret: String,
}

#[derive(Deserialize)]
struct SettingsSection {
    #[serde(default, deserialize_with = "lenient::string")]
    directory: String,
    #[serde(default, deserialize_with = "lenient::string")]
    prefix: String,
    #[serde(default, deserialize_with = "lenient::positive_integer")]
    timeout: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    endpoint: String,
    #[serde(default, deserialize_with = "lenient::string")]
    user_agent: String,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        let ConfigFile { oauth, settings } = file;
        let defaults = OutputSettings::default();

        Config {
            credentials: Credentials {
                consumer_key: oauth.app.consumer_key,
                consumer_secret: oauth.app.consumer_secret,
                access_token: oauth.account.access_token,
                access_token_secret: oauth.account.access_token_secret,
            },
            settings: OutputSettings {
                directory: settings.directory,
                prefix: settings.prefix,
                timeout_ms: settings.timeout.unwrap_or(defaults.timeout_ms),
                endpoint: non_empty_or(settings.endpoint, defaults.endpoint),
                user_agent: non_empty_or(settings.user_agent, defaults.user_agent),
            },
        }
    }
}

fn non_empty_or(value: String, default: String) -> String {
    if value.is_empty() { default } else { value }
}

// Leaf deserializers that never fail: wrong types degrade to "absent"
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            _ => String::new(),
        })
    }

    pub fn positive_integer<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?
            .as_u64()
            .filter(|value| *value > 0))
    }
}
