//! Output file naming and creation
//!
//! Captures are written to `{directory}/{prefix}[Mon_DD_YYYY]@[HH:MM:SS].json`.
//! An empty directory means the working directory.

use crate::config::OutputSettings;
use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// strftime pattern for the timestamp part of the file name
pub const TIMESTAMP_FORMAT: &str = "[%b_%d_%Y]@[%H:%M:%S]";

/// Extension of every capture file
pub const EXTENSION: &str = "json";

/// Format `now` the way it appears in capture file names
pub fn format_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// The capture path for `now`, without touching the filesystem
pub fn output_path<Tz>(settings: &OutputSettings, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let file_name = format!("{}{}.{}", settings.prefix, format_timestamp(now), EXTENSION);
    output_dir(settings).join(file_name)
}

/// Derive the capture path for `now` and create its directory
///
/// Missing ancestors of the directory are created as well.
pub fn build<Tz>(settings: &OutputSettings, now: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let dir = output_dir(settings);
    std::fs::create_dir_all(&dir).map_err(|e| Error::path(&dir, e))?;

    let path = output_path(settings, now);
    tracing::debug!(path = %path.display(), "output path ready");
    Ok(path)
}

/// Open `path` for writing, truncating any previous content
pub async fn open(path: &Path) -> Result<tokio::fs::File> {
    tokio::fs::File::create(path)
        .await
        .map_err(|e| Error::path(path, e))
}

fn output_dir(settings: &OutputSettings) -> PathBuf {
    if settings.directory.is_empty() {
        PathBuf::from(".")
    } else {
        PathBuf::from(&settings.directory)
    }
}
