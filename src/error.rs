//! Error types for tweet-capture
//!
//! Every failure of a capture run is one variant of [`Error`]. Failures are
//! split by the phase they happen in:
//! - pre-flight (config, signing, output path), before any connection is made
//! - mid-flight (remote status, transport, sink I/O), after the output file was opened
//!
//! A bounded capture that reaches its timeout is not an error; see
//! [`crate::stream::CaptureStatus::TimedOut`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tweet-capture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tweet-capture
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration missing, unreadable or malformed
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "oauth.app")
        key: Option<String>,
    },

    /// The request could not be signed (malformed URL)
    #[error("signing error: {0}")]
    Signing(String),

    /// Output directory could not be created or the output file could not be opened
    #[error("output path error at {path}: {reason}")]
    Path {
        /// The directory or file that could not be created
        path: PathBuf,
        /// The reason the operation failed
        reason: String,
    },

    /// The endpoint answered with an HTTP status >= 400
    #[error("remote error: HTTP {status} {reason}")]
    Remote {
        /// The HTTP status code
        status: u16,
        /// The canonical reason phrase, empty if unknown
        reason: String,
    },

    /// Connection, TLS or mid-stream network failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Writing to the output sink failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config document is not well-formed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error without an associated key
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Create a path error for `path`
    pub fn path(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Path {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error happened before any connection attempt
    pub fn is_pre_flight(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::Signing(_) | Error::Path { .. } | Error::Serialization(_)
        )
    }
}

/// Map errors to process exit codes
///
/// Codes follow the BSD `sysexits.h` conventions so shell callers can tell
/// failure classes apart. Success (including a timed-out capture) is always 0
/// and is never produced by this trait.
pub trait ToExitCode {
    /// Get the process exit code for this error
    fn exit_code(&self) -> u8;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToExitCode for Error {
    fn exit_code(&self) -> u8 {
        match self {
            // EX_CONFIG
            Error::Config { .. } => 78,
            Error::Serialization(_) => 78,

            // EX_DATAERR
            Error::Signing(_) => 65,

            // EX_CANTCREAT
            Error::Path { .. } => 73,

            // EX_UNAVAILABLE
            Error::Remote { .. } => 69,

            // EX_IOERR
            Error::Transport(_) => 74,
            Error::Io(_) => 74,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Serialization(_) => "config_malformed",
            Error::Signing(_) => "signing_error",
            Error::Path { .. } => "path_error",
            Error::Remote { .. } => "remote_error",
            Error::Transport(_) => "transport_error",
            Error::Io(_) => "io_error",
        }
    }
}
