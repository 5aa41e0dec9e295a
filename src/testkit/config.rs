//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::processing::ProcessingConfig;
use crate::infrastructure::config::sdk::PartyConfig;

/// Processing config with zero delays and the given batch size.
pub fn processing(transfers_per_bulk: usize) -> ProcessingConfig {
    ProcessingConfig {
        transfers_per_bulk,
        max_attempts: 3,
        retry_backoff_ms: 0,
        batch_pause_ms: 0,
        callback_timeout_ms: 0,
        callback_bind: None,
    }
}

/// Default payer and payee parties.
pub fn parties() -> PartyConfig {
    PartyConfig::default()
}
