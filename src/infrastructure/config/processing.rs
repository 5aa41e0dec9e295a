//! Batching and retry settings for bulk runs.

use std::time::Duration;

use serde::Deserialize;

/// How payments are split into bulks and how failed submissions are retried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessingConfig {
    /// Maximum payments per bulk quote / bulk transfer.
    #[serde(default = "default_transfers_per_bulk")]
    pub transfers_per_bulk: usize,
    /// Attempts per submission, first one included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n` times this (milliseconds).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Pause between consecutive batches (milliseconds).
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
    /// How long to wait for a bulk quote callback after a `202` (milliseconds).
    #[serde(default = "default_callback_timeout_ms")]
    pub callback_timeout_ms: u64,
    /// Address to receive SDK callbacks on during a run; none means callbacks
    /// are not listened for.
    #[serde(default)]
    pub callback_bind: Option<String>,
}

fn default_transfers_per_bulk() -> usize {
    100
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_batch_pause_ms() -> u64 {
    1000
}

fn default_callback_timeout_ms() -> u64 {
    30_000
}

impl ProcessingConfig {
    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    #[must_use]
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    #[must_use]
    pub fn callback_timeout(&self) -> Duration {
        Duration::from_millis(self.callback_timeout_ms)
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            transfers_per_bulk: default_transfers_per_bulk(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            batch_pause_ms: default_batch_pause_ms(),
            callback_timeout_ms: default_callback_timeout_ms(),
            callback_bind: None,
        }
    }
}
