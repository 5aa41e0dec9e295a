//! Bulk batch planning.
//!
//! Splits a payment list into bulks and builds the outbound payloads for
//! each: first a bulk quote, then, once quote results are known, the bulk
//! transfer carrying each quote's ILP packet and condition.

use std::collections::HashMap;

use crate::domain::bulk::{
    AmountType, BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload, OutboundQuote,
    OutboundTransfer, QuoteAcceptance,
};
use crate::domain::id::{BulkQuoteId, BulkTransferId, HomeTransactionId, QuoteId, TransferId};
use crate::domain::money::format_amount;
use crate::domain::party::Party;
use crate::domain::payment::Payment;
use crate::infrastructure::config::sdk::PartyConfig;

const TRANSACTION_TYPE: &str = "TRANSFER";

/// A payment with the identifiers allocated for it in its bulk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPayment {
    pub quote_id: QuoteId,
    pub transfer_id: TransferId,
    pub payment: Payment,
}

/// One bulk of payments, quoted and transferred together.
#[derive(Debug, Clone)]
pub struct BulkBatch {
    /// 0-based position of this batch in the run.
    pub index: usize,
    pub bulk_quote_id: BulkQuoteId,
    pub bulk_transfer_id: BulkTransferId,
    pub payments: Vec<TrackedPayment>,
    payer: Party,
    payee_fsp: String,
}

/// Split payments into bulks of at most `transfers_per_bulk`.
///
/// A batch size of zero is treated as one. Every batch and payment gets fresh
/// identifiers.
#[must_use]
pub fn plan_batches(
    payments: &[Payment],
    transfers_per_bulk: usize,
    parties: &PartyConfig,
) -> Vec<BulkBatch> {
    let size = transfers_per_bulk.max(1);
    let payer = Party::msisdn(&parties.payer_msisdn, &parties.payer_fsp);

    payments
        .chunks(size)
        .enumerate()
        .map(|(index, chunk)| BulkBatch {
            index,
            bulk_quote_id: BulkQuoteId::generate(),
            bulk_transfer_id: BulkTransferId::generate(),
            payments: chunk
                .iter()
                .map(|payment| TrackedPayment {
                    quote_id: QuoteId::generate(),
                    transfer_id: TransferId::generate(),
                    payment: payment.clone(),
                })
                .collect(),
            payer: payer.clone(),
            payee_fsp: parties.payee_fsp.clone(),
        })
        .collect()
}

impl BulkBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    fn payee(&self, payment: &Payment) -> Party {
        Party::msisdn(&payment.id_value, &self.payee_fsp)
    }

    /// Payload for `POST /bulkQuotes`.
    #[must_use]
    pub fn quote_payload(&self) -> BulkQuotePayload {
        BulkQuotePayload {
            home_transaction_id: HomeTransactionId::generate(),
            bulk_quote_id: self.bulk_quote_id.clone(),
            from: self.payer.clone(),
            individual_quotes: self
                .payments
                .iter()
                .map(|tracked| OutboundQuote {
                    quote_id: tracked.quote_id.clone(),
                    to: self.payee(&tracked.payment),
                    amount_type: AmountType::Send,
                    currency: tracked.payment.currency.clone(),
                    amount: format_amount(tracked.payment.amount),
                    transaction_type: TRANSACTION_TYPE.to_string(),
                    note: note_for(&tracked.payment),
                })
                .collect(),
        }
    }

    /// Payload for `POST /bulkTransfers`, given the bulk quote response.
    ///
    /// Payments whose quote has no result are left out; see
    /// [`BulkBatch::unquoted`].
    #[must_use]
    pub fn transfer_payload(&self, quotes: &BulkQuoteResponse) -> BulkTransferPayload {
        let by_id = index_quotes(quotes);

        BulkTransferPayload {
            home_transaction_id: HomeTransactionId::generate(),
            bulk_transfer_id: self.bulk_transfer_id.clone(),
            bulk_quote_id: self.bulk_quote_id.clone(),
            from: self.payer.clone(),
            individual_transfers: self
                .payments
                .iter()
                .filter_map(|tracked| {
                    let quote = by_id.get(&tracked.quote_id)?;
                    Some(OutboundTransfer {
                        transfer_id: tracked.transfer_id.clone(),
                        to: self.payee(&tracked.payment),
                        amount_type: AmountType::Send,
                        currency: tracked.payment.currency.clone(),
                        amount: format_amount(tracked.payment.amount),
                        transaction_type: TRANSACTION_TYPE.to_string(),
                        note: note_for(&tracked.payment),
                        ilp_packet: quote.ilp_packet.clone(),
                        condition: quote.condition.clone(),
                    })
                })
                .collect(),
        }
    }

    /// Payments of this batch with no result in the bulk quote response.
    #[must_use]
    pub fn unquoted<'a>(&'a self, quotes: &BulkQuoteResponse) -> Vec<&'a TrackedPayment> {
        let by_id = index_quotes(quotes);
        self.payments
            .iter()
            .filter(|tracked| !by_id.contains_key(&tracked.quote_id))
            .collect()
    }
}

fn index_quotes(quotes: &BulkQuoteResponse) -> HashMap<&QuoteId, &QuoteAcceptance> {
    quotes
        .individual_quote_results
        .iter()
        .map(|quote| (&quote.quote_id, quote))
        .collect()
}

fn note_for(payment: &Payment) -> String {
    format!("Payment to {}", payment.full_name)
}
