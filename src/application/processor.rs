//! Bulk processor: quote then transfer, batch by batch.
//!
//! For each planned batch the processor submits the bulk quote, builds the
//! bulk transfer from the quote results, and submits it. Both submissions are
//! retried up to `max_attempts` times with a linearly growing delay. A quote
//! accepted for asynchronous processing is resolved from the
//! [`CallbackInbox`] within `callback_timeout_ms`. Every payment ends with
//! exactly one [`TransferOutcome`], in input order.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::batch::{plan_batches, BulkBatch};
use super::callback::CallbackInbox;
use crate::domain::bulk::BulkQuoteResponse;
use crate::domain::id::TransferId;
use crate::domain::outcome::TransferOutcome;
use crate::domain::payment::Payment;
use crate::error::Result;
use crate::infrastructure::config::processing::ProcessingConfig;
use crate::infrastructure::config::sdk::PartyConfig;
use crate::port::outbound::gateway::{BulkGateway, Submission};

/// Drives payments through a [`BulkGateway`].
pub struct BulkProcessor<G> {
    gateway: G,
    config: ProcessingConfig,
    parties: PartyConfig,
    callbacks: Option<Arc<CallbackInbox>>,
}

impl<G: BulkGateway> BulkProcessor<G> {
    pub fn new(gateway: G, config: ProcessingConfig, parties: PartyConfig) -> Self {
        Self {
            gateway,
            config,
            parties,
            callbacks: None,
        }
    }

    /// Resolve accepted quotes from callbacks delivered to `inbox`.
    #[must_use]
    pub fn with_callbacks(mut self, inbox: Arc<CallbackInbox>) -> Self {
        self.callbacks = Some(inbox);
        self
    }

    /// The gateway payloads are sent through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Process all payments, returning one outcome per payment.
    pub async fn process(&self, payments: &[Payment]) -> Vec<TransferOutcome> {
        self.process_with_progress(payments, |_, _| {}).await
    }

    /// Like [`BulkProcessor::process`], calling `on_batch` after each batch.
    pub async fn process_with_progress<F>(
        &self,
        payments: &[Payment],
        mut on_batch: F,
    ) -> Vec<TransferOutcome>
    where
        F: FnMut(&BulkBatch, &[TransferOutcome]),
    {
        let batches = plan_batches(payments, self.config.transfers_per_bulk, &self.parties);
        let total = batches.len();
        info!(
            payments = payments.len(),
            batches = total,
            batch_size = self.config.transfers_per_bulk,
            gateway = self.gateway.name(),
            "Starting bulk processing"
        );

        let mut outcomes = Vec::with_capacity(payments.len());
        for batch in &batches {
            info!(
                batch = batch.index + 1,
                of = total,
                payments = batch.len(),
                bulk_quote_id = %batch.bulk_quote_id,
                bulk_transfer_id = %batch.bulk_transfer_id,
                "Processing batch"
            );

            let batch_outcomes = self.run_batch(batch).await;
            let succeeded = batch_outcomes.iter().filter(|o| o.is_success()).count();
            info!(
                batch = batch.index + 1,
                succeeded,
                failed = batch_outcomes.len() - succeeded,
                "Batch finished"
            );
            on_batch(batch, &batch_outcomes);
            outcomes.extend(batch_outcomes);

            if batch.index + 1 < total && !self.config.batch_pause().is_zero() {
                tokio::time::sleep(self.config.batch_pause()).await;
            }
        }

        outcomes
    }

    async fn run_batch(&self, batch: &BulkBatch) -> Vec<TransferOutcome> {
        let quote_payload = batch.quote_payload();
        let quotes = match self
            .with_retries("bulk quote", || self.gateway.submit_bulk_quote(&quote_payload))
            .await
        {
            Ok(Submission::Completed(quotes)) => quotes,
            Ok(_) => match self.await_quote_callback(batch).await {
                Some(quotes) => quotes,
                None => return fail_all(batch, "quote failed: no quote results received"),
            },
            Err(reason) => return fail_all(batch, &format!("quote failed: {reason}")),
        };

        let transfer_payload = batch.transfer_payload(&quotes);
        if transfer_payload.individual_transfers.is_empty() {
            warn!(batch = batch.index + 1, "No quote results matched this batch");
            return fail_all(batch, "no quote result");
        }

        let unquoted = unquoted_ids(batch, &quotes);
        for tracked in batch.payments.iter().filter(|t| unquoted.contains(&t.transfer_id)) {
            warn!(quote_id = %tracked.quote_id, "No quote result for payment");
        }

        let transfer = self
            .with_retries("bulk transfer", || {
                self.gateway.submit_bulk_transfer(&transfer_payload)
            })
            .await;

        batch
            .payments
            .iter()
            .map(|tracked| {
                if unquoted.contains(&tracked.transfer_id) {
                    return TransferOutcome::failed(
                        &batch.bulk_transfer_id,
                        &tracked.transfer_id,
                        &tracked.payment,
                        "no quote result",
                    );
                }
                match &transfer {
                    Ok(_) => TransferOutcome::success(
                        &batch.bulk_transfer_id,
                        &tracked.transfer_id,
                        &tracked.payment,
                    ),
                    Err(reason) => TransferOutcome::failed(
                        &batch.bulk_transfer_id,
                        &tracked.transfer_id,
                        &tracked.payment,
                        format!("transfer failed: {reason}"),
                    ),
                }
            })
            .collect()
    }

    async fn await_quote_callback(&self, batch: &BulkBatch) -> Option<BulkQuoteResponse> {
        let Some(inbox) = &self.callbacks else {
            warn!(batch = batch.index + 1, "Bulk quote accepted but no callback listener");
            return None;
        };

        let timeout = self.config.callback_timeout();
        info!(
            bulk_quote_id = %batch.bulk_quote_id,
            timeout_ms = self.config.callback_timeout_ms,
            "Waiting for bulk quote callback"
        );
        let Some(body) = inbox.wait_for(batch.bulk_quote_id.as_str(), timeout).await else {
            warn!(bulk_quote_id = %batch.bulk_quote_id, "Timed out waiting for bulk quote callback");
            return None;
        };

        match serde_json::from_value::<BulkQuoteResponse>(body) {
            Ok(quotes) => Some(quotes),
            Err(err) => {
                debug!(error = %err, "Bulk quote callback has no readable results");
                None
            }
        }
    }

    /// Run `submit` until the backend accepts it or attempts run out.
    ///
    /// Returns the accepted submission, or the last failure reason.
    async fn with_retries<T, F, Fut>(
        &self,
        what: &'static str,
        mut submit: F,
    ) -> std::result::Result<Submission<T>, String>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Submission<T>>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let reason = match submit().await {
                Ok(Submission::Rejected { status, reason }) => {
                    format!("HTTP {status}: {reason}")
                }
                Ok(submission) => return Ok(submission),
                Err(err) => err.to_string(),
            };

            warn!(what, attempt, max_attempts, reason = %reason, "Submission failed");
            if attempt >= max_attempts {
                return Err(reason);
            }

            let delay = self.config.retry_backoff() * attempt;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn unquoted_ids(batch: &BulkBatch, quotes: &BulkQuoteResponse) -> HashSet<TransferId> {
    batch
        .unquoted(quotes)
        .into_iter()
        .map(|tracked| tracked.transfer_id.clone())
        .collect()
}

fn fail_all(batch: &BulkBatch, reason: &str) -> Vec<TransferOutcome> {
    batch
        .payments
        .iter()
        .map(|tracked| {
            TransferOutcome::failed(
                &batch.bulk_transfer_id,
                &tracked.transfer_id,
                &tracked.payment,
                reason,
            )
        })
        .collect()
}
