//! Config builders pointing a capture at a local endpoint

use std::path::Path;
use tweet_capture::{Config, Credentials, OutputSettings};

/// Credentials with every field populated
pub fn test_credentials() -> Credentials {
    Credentials {
        consumer_key: "a".to_string(),
        consumer_secret: "b".to_string(),
        access_token: "c".to_string(),
        access_token_secret: "d".to_string(),
    }
}

/// Capture `endpoint` into `directory` with prefix `run_`
pub fn capture_config(endpoint: &str, directory: &Path, timeout_ms: u64) -> Config {
    Config {
        credentials: test_credentials(),
        settings: OutputSettings {
            directory: directory.to_string_lossy().into_owned(),
            prefix: "run_".to_string(),
            timeout_ms,
            endpoint: endpoint.to_string(),
            ..OutputSettings::default()
        },
    }
}

/// The same capture expressed as a config file document
pub fn config_document(endpoint: &str, directory: &Path, timeout_ms: i64) -> serde_json::Value {
    serde_json::json!({
        "oauth": {
            "app": { "consumer_key": "a", "consumer_secret": "b" },
            "account": { "access_token": "c", "access_token_secret": "d" }
        },
        "settings": {
            "directory": directory,
            "prefix": "run_",
            "timeout": timeout_ms,
            "endpoint": endpoint
        }
    })
}
