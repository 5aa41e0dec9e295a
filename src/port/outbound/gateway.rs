//! Gateway port for submitting bulk payloads.
//!
//! The harness talks to the scheme through this trait. Production code uses
//! the SDK client; tests and dry runs use an in-process simulation.

use async_trait::async_trait;

use crate::domain::bulk::{BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload};
use crate::error::Result;

/// How the backend answered a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Processed synchronously; the reply body is available.
    Completed(T),
    /// Accepted for asynchronous processing; results arrive by callback.
    Accepted,
    /// Refused by the backend.
    Rejected {
        /// HTTP status returned.
        status: u16,
        /// Response text, for diagnostics.
        reason: String,
    },
}

/// Sends bulk quotes and bulk transfers to a payment backend.
#[async_trait]
pub trait BulkGateway: Send + Sync {
    /// Submit a bulk quote.
    async fn submit_bulk_quote(
        &self,
        payload: &BulkQuotePayload,
    ) -> Result<Submission<BulkQuoteResponse>>;

    /// Submit a bulk transfer.
    async fn submit_bulk_transfer(&self, payload: &BulkTransferPayload) -> Result<Submission<()>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
