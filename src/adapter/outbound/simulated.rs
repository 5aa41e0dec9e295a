//! In-process backend answering with synthetic results.
//!
//! Quotes are answered with [`build_individual_quote_results`], so every
//! quote gets a result carrying a fresh ILP packet and condition. Transfers
//! are always accepted. Submitted payloads are recorded for inspection.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::synth::{build_individual_quote_results, RequestContext};
use crate::domain::bulk::{BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload};
use crate::error::Result;
use crate::port::outbound::gateway::{BulkGateway, Submission};

pub struct SimulatedGateway {
    rng: Mutex<StdRng>,
    quotes: Mutex<Vec<BulkQuoteResponse>>,
    transfers: Mutex<Vec<BulkTransferPayload>>,
}

impl SimulatedGateway {
    /// Simulation seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Simulation producing the same artifacts on every run.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            quotes: Mutex::new(Vec::new()),
            transfers: Mutex::new(Vec::new()),
        }
    }

    /// Bulk quote responses returned so far.
    #[must_use]
    pub fn quote_responses(&self) -> Vec<BulkQuoteResponse> {
        self.quotes.lock().clone()
    }

    /// Bulk transfer payloads received so far.
    #[must_use]
    pub fn transfers(&self) -> Vec<BulkTransferPayload> {
        self.transfers.lock().clone()
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BulkGateway for SimulatedGateway {
    async fn submit_bulk_quote(
        &self,
        payload: &BulkQuotePayload,
    ) -> Result<Submission<BulkQuoteResponse>> {
        let context = RequestContext::with_body(serde_json::to_value(payload)?);
        let results = build_individual_quote_results(&context, &mut *self.rng.lock());

        let response = BulkQuoteResponse {
            bulk_quote_id: Some(payload.bulk_quote_id.clone()),
            individual_quote_results: results.into_iter().map(Into::into).collect(),
        };
        self.quotes.lock().push(response.clone());
        Ok(Submission::Completed(response))
    }

    async fn submit_bulk_transfer(&self, payload: &BulkTransferPayload) -> Result<Submission<()>> {
        self.transfers.lock().push(payload.clone());
        Ok(Submission::Completed(()))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
