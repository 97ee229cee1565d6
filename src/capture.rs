//! A single capture run, from config to closed output file
//!
//! Pre-flight steps (config, signing, output path) happen before any
//! connection is attempted, so their failures never touch the network. Once
//! the output file is open it is flushed, synced and closed on every exit path
//! and keeps whatever was received.

use crate::config::{self, Config};
use crate::error::Result;
use crate::oauth;
use crate::output;
use crate::stream::{FetchReport, StreamFetcher};
use crate::transport::HttpTransport;
use chrono::{DateTime, Local, TimeZone};
use reqwest::Method;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Outcome of a successful capture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureReport {
    /// File the stream was written to
    pub path: PathBuf,
    /// How the fetch ended
    pub fetch: FetchReport,
}

/// Resolve and load the config, then capture
///
/// `cli_path` is the optional config path from the command line.
pub async fn run_from(cli_path: Option<&Path>) -> Result<CaptureReport> {
    let config_path = config::resolve_config_path(cli_path)?;
    tracing::info!(path = %config_path.display(), "using config file");

    let config = Config::load(&config_path)?;
    run(&config).await
}

/// Capture with a file named after the current local time
pub async fn run(config: &Config) -> Result<CaptureReport> {
    run_at(config, &Local::now()).await
}

/// Capture with a file named after `now`
pub async fn run_at<Tz>(config: &Config, now: &DateTime<Tz>) -> Result<CaptureReport>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let settings = &config.settings;

    let request = oauth::sign(Method::GET, &settings.endpoint, &config.credentials)?;
    let transport = HttpTransport::acquire(&settings.user_agent)?;
    let path = output::build(settings, now)?;
    let mut file = output::open(&path).await?;

    tracing::info!(
        endpoint = %settings.endpoint,
        path = %path.display(),
        timeout_ms = settings.timeout_ms,
        "capture started"
    );

    let fetched = StreamFetcher::new(&transport)
        .fetch(&request, &mut file, settings.timeout())
        .await;
    transport.release();

    if let Err(e) = file.sync_all().await {
        tracing::warn!(path = %path.display(), error = %e, "failed to sync capture file");
    }
    drop(file);

    let fetch = fetched?;
    Ok(CaptureReport { path, fetch })
}
