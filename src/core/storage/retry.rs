//! Bounded retry with exponential backoff for storage cleanup.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::core::config::StorageConfig;
use crate::core::error::{DocRagError, Result};

/// Retry schedule for fallible filesystem operations
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first failure
    pub max_retries: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Multiplier applied to the delay after each retry
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            initial_delay: Duration::from_millis(500),
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration, backoff_factor: f64) -> Self {
        Self {
            max_retries,
            initial_delay,
            backoff_factor,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.cleanup_retries,
            config.cleanup_retry_delay(),
            config.cleanup_backoff_factor,
        )
    }

    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO, 1.0)
    }

    /// Delay before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.backoff_factor.max(1.0).powi(retry as i32);
        Duration::try_from_secs_f64(self.initial_delay.as_secs_f64() * factor)
            .unwrap_or(Duration::MAX)
    }

    /// Run `op` until it succeeds or retries are exhausted.
    ///
    /// The final I/O error is surfaced as [`DocRagError::StorageError`].
    pub fn run<T>(&self, what: &str, mut op: impl FnMut() -> io::Result<T>) -> Result<T> {
        let mut retry = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if retry < self.max_retries => {
                    let delay = self.delay_for(retry);
                    tracing::warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        what,
                        retry + 1,
                        self.max_retries + 1,
                        e,
                        delay
                    );
                    thread::sleep(delay);
                    retry += 1;
                }
                Err(e) => {
                    tracing::error!("{} failed after {} attempts: {}", what, retry + 1, e);
                    return Err(DocRagError::StorageError(format!("{what}: {e}")));
                }
            }
        }
    }

    /// Remove a directory tree; a missing directory counts as success
    pub fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.run(&format!("remove {}", path.display()), || {
            match std::fs::remove_dir_all(path) {
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                other => other,
            }
        })
    }
}
