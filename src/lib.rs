//! # tweet-capture
//!
//! Capture a bounded window of a Twitter streaming endpoint to disk.
//!
//! A run loads OAuth 1.0a credentials and output settings from a JSON config,
//! signs a GET for the streaming endpoint, and writes the raw response body
//! into `{directory}/{prefix}[Mon_DD_YYYY]@[HH:MM:SS].json` until the capture
//! window elapses or the endpoint closes the stream.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tweet_capture::{Config, capture};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.json".as_ref())?;
//!     let report = capture::run(&config).await?;
//!
//!     println!(
//!         "{}: {} bytes in {:?} -> {}",
//!         report.fetch.status,
//!         report.fetch.bytes_written,
//!         report.fetch.elapsed,
//!         report.path.display()
//!     );
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Capture run orchestration
pub mod capture;
/// Configuration types and loading
pub mod config;
/// Error types
pub mod error;
/// Tracing subscriber setup
pub mod logging;
/// OAuth 1.0a request signing
pub mod oauth;
/// Output file naming and creation
pub mod output;
/// Bounded stream fetching
pub mod stream;
/// HTTP transport lifetime
pub mod transport;

// Re-export commonly used types
pub use capture::CaptureReport;
pub use config::{Config, Credentials, OutputSettings};
pub use error::{Error, Result, ToExitCode};
pub use oauth::AuthenticatedRequest;
pub use stream::{CaptureStatus, FetchReport, StreamFetcher};
pub use transport::HttpTransport;
