//! Bounded capture of a streaming HTTP response
//!
//! The fetcher issues the signed GET and copies the body, chunk by chunk, into a
//! sink until one of three things happens:
//! - the capture window elapses ([`CaptureStatus::TimedOut`], the normal case)
//! - the endpoint closes the stream ([`CaptureStatus::Completed`])
//! - something fails ([`Error::Remote`], [`Error::Transport`] or [`Error::Io`])
//!
//! The body is newline-delimited JSON but is never parsed here; bytes are
//! written exactly as received.

use crate::error::{Error, Result};
use crate::oauth::AuthenticatedRequest;
use crate::transport::HttpTransport;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

/// Successful end of a capture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    /// The endpoint closed the stream before the window elapsed
    Completed,
    /// The capture window elapsed while connecting or streaming
    TimedOut,
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureStatus::Completed => f.write_str("completed"),
            CaptureStatus::TimedOut => f.write_str("timed out"),
        }
    }
}

/// What a successful fetch did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchReport {
    /// How the capture ended
    pub status: CaptureStatus,
    /// Bytes written to the sink
    pub bytes_written: u64,
    /// Wall-clock time from request start to the end of the capture
    pub elapsed: Duration,
}

/// Lifecycle of a single fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FetchState {
    Idle,
    Connecting,
    Streaming,
    Completed,
    TimedOut,
    Failed,
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchState::Idle => "idle",
            FetchState::Connecting => "connecting",
            FetchState::Streaming => "streaming",
            FetchState::Completed => "completed",
            FetchState::TimedOut => "timed_out",
            FetchState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct Progress {
    state: FetchState,
    bytes_written: u64,
}

impl Progress {
    fn enter(&mut self, next: FetchState) {
        tracing::debug!(from = %self.state, to = %next, "fetch state change");
        self.state = next;
    }
}

/// Copies one streaming response into a sink within a time bound
#[derive(Debug)]
pub struct StreamFetcher<'a> {
    transport: &'a HttpTransport,
}

impl<'a> StreamFetcher<'a> {
    /// Create a fetcher that sends its request through `transport`
    pub fn new(transport: &'a HttpTransport) -> Self {
        Self { transport }
    }

    /// Stream `request` into `sink` for at most `timeout`
    ///
    /// The bound is measured from the moment the request starts, so a slow
    /// connect eats into the capture window. The sink is flushed on every
    /// exit path; bytes written before a failure stay in it.
    pub async fn fetch<W>(
        &self,
        request: &AuthenticatedRequest,
        sink: &mut W,
        timeout: Duration,
    ) -> Result<FetchReport>
    where
        W: AsyncWrite + Unpin,
    {
        let started = Instant::now();
        let mut progress = Progress {
            state: FetchState::Idle,
            bytes_written: 0,
        };

        let deadline = started + timeout;
        let transfer = self.transfer(request, &mut *sink, &mut progress);
        let outcome = tokio::time::timeout_at(deadline, transfer).await;

        let interrupted_in = progress.state;
        let result = match outcome {
            Ok(Ok(())) => {
                progress.enter(FetchState::Completed);
                Ok(CaptureStatus::Completed)
            }
            Err(_) => {
                progress.enter(FetchState::TimedOut);
                if interrupted_in == FetchState::Connecting {
                    tracing::warn!(
                        timeout_ms = timeout.as_millis() as u64,
                        "capture window elapsed before the stream opened"
                    );
                }
                Ok(CaptureStatus::TimedOut)
            }
            Ok(Err(e)) => {
                progress.enter(FetchState::Failed);
                tracing::debug!(
                    state = %interrupted_in,
                    bytes_written = progress.bytes_written,
                    "stream fetch failed"
                );
                Err(e)
            }
        };

        let flushed = sink.flush().await;
        let elapsed = started.elapsed();

        match (result, flushed) {
            (Ok(status), Ok(())) => Ok(FetchReport {
                status,
                bytes_written: progress.bytes_written,
                elapsed,
            }),
            (Ok(_), Err(e)) => Err(Error::Io(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(flush_error)) => {
                tracing::warn!(error = %flush_error, "failed to flush partial capture");
                Err(e)
            }
        }
    }

    async fn transfer<W>(
        &self,
        request: &AuthenticatedRequest,
        sink: &mut W,
        progress: &mut Progress,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        progress.enter(FetchState::Connecting);
        let mut response = self
            .transport
            .client()
            .request(request.method.clone(), request.url.clone())
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(Error::Remote {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        tracing::info!(status = status.as_u16(), "stream opened");
        progress.enter(FetchState::Streaming);

        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            progress.bytes_written += chunk.len() as u64;
            tracing::trace!(
                chunk_bytes = chunk.len(),
                total_bytes = progress.bytes_written,
                "chunk written"
            );
        }

        Ok(())
    }
}
