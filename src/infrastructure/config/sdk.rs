//! Outbound SDK connection and party settings.

use serde::Deserialize;

/// Environment variable overriding [`SdkConfig::url`].
pub const SDK_URL_ENV: &str = "SDK_URL";

/// Connection settings for the outbound SDK API.
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    /// Base URL exposing `/bulkQuotes` and `/bulkTransfers`.
    #[serde(default = "default_url")]
    pub url: String,
    /// Whole-request timeout (milliseconds).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection establishment timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default)]
    pub parties: PartyConfig,
}

fn default_url() -> String {
    "http://localhost:4001".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            parties: PartyConfig::default(),
        }
    }
}

/// Payer identity and the FSPs on both sides of every transfer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PartyConfig {
    #[serde(default = "default_payer_fsp")]
    pub payer_fsp: String,
    #[serde(default = "default_payee_fsp")]
    pub payee_fsp: String,
    /// MSISDN of the paying account.
    #[serde(default = "default_payer_msisdn")]
    pub payer_msisdn: String,
}

fn default_payer_fsp() -> String {
    "itk-load-test-dfsp".into()
}

fn default_payee_fsp() -> String {
    "testingtoolkitdfsp".into()
}

fn default_payer_msisdn() -> String {
    "22912345678".into()
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            payer_fsp: default_payer_fsp(),
            payee_fsp: default_payee_fsp(),
            payer_msisdn: default_payer_msisdn(),
        }
    }
}
