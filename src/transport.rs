//! Process-wide HTTP transport
//!
//! The HTTP client is acquired once before the capture and released once the
//! request is over. Release happens on drop, so every exit path of a run gives
//! the transport back.

use crate::error::Result;
use std::time::Instant;

/// The HTTP client shared by the single request of a run
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    acquired_at: Instant,
}

impl HttpTransport {
    /// Build the client and its connection pool
    ///
    /// No request timeout is configured here: the capture window is enforced by
    /// [`crate::stream::StreamFetcher`] as a wall-clock bound.
    pub fn acquire(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        tracing::debug!(user_agent = %user_agent, "HTTP transport acquired");

        Ok(Self {
            client,
            acquired_at: Instant::now(),
        })
    }

    /// The underlying client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Release the transport now instead of at the end of the scope
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for HttpTransport {
    fn drop(&mut self) {
        tracing::debug!(
            held_ms = self.acquired_at.elapsed().as_millis() as u64,
            "HTTP transport released"
        );
    }
}
