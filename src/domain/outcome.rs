//! Per-payment outcomes and run summaries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::id::{BulkTransferId, TransferId};
use super::money::{Amount, Currency};
use super::payment::Payment;

/// Final status of one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Success,
    Failed,
}

/// What happened to one payment of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferOutcome {
    pub bulk_transfer_id: BulkTransferId,
    pub transfer_id: TransferId,
    pub id_value: String,
    pub full_name: String,
    pub amount: Amount,
    pub currency: Currency,
    pub status: TransferStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransferOutcome {
    #[must_use]
    pub fn success(bulk: &BulkTransferId, transfer: &TransferId, payment: &Payment) -> Self {
        Self::build(bulk, transfer, payment, TransferStatus::Success, None)
    }

    #[must_use]
    pub fn failed(
        bulk: &BulkTransferId,
        transfer: &TransferId,
        payment: &Payment,
        error: impl Into<String>,
    ) -> Self {
        Self::build(
            bulk,
            transfer,
            payment,
            TransferStatus::Failed,
            Some(error.into()),
        )
    }

    fn build(
        bulk: &BulkTransferId,
        transfer: &TransferId,
        payment: &Payment,
        status: TransferStatus,
        error: Option<String>,
    ) -> Self {
        Self {
            bulk_transfer_id: bulk.clone(),
            transfer_id: transfer.clone(),
            id_value: payment.id_value.clone(),
            full_name: payment.full_name.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
            status,
            error,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, TransferStatus::Success)
    }
}

/// Summary of a bulk upload, one per processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub bulk_id: Uuid,
    pub filename: String,
    pub total_rows: usize,
    pub succeeded: usize,
    pub technical_failures: usize,
    pub invalid_rows: usize,
    pub processed_at: DateTime<Utc>,
}

impl BulkSummary {
    /// Summarise the outcomes of a run over a payment list.
    ///
    /// `total_rows` counts every row of the file, valid or not.
    #[must_use]
    pub fn from_outcomes(
        filename: impl Into<String>,
        total_rows: usize,
        invalid_rows: usize,
        outcomes: &[TransferOutcome],
    ) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            bulk_id: Uuid::new_v4(),
            filename: filename.into(),
            total_rows,
            succeeded,
            technical_failures: outcomes.len() - succeeded,
            invalid_rows,
            processed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_counts_successes_and_failures() {
        let payment = Payment::single("0123456789", dec!(10)).unwrap();
        let bulk = BulkTransferId::new("B1");
        let outcomes = vec![
            TransferOutcome::success(&bulk, &TransferId::new("T1"), &payment),
            TransferOutcome::failed(&bulk, &TransferId::new("T2"), &payment, "boom"),
            TransferOutcome::success(&bulk, &TransferId::new("T3"), &payment),
        ];

        let summary = BulkSummary::from_outcomes("payments.csv", 5, 2, &outcomes);

        assert_eq!(summary.filename, "payments.csv");
        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.technical_failures, 1);
        assert_eq!(summary.invalid_rows, 2);
    }

    #[test]
    fn failed_outcome_serializes_status_and_error() {
        let payment = Payment::single("0123456789", dec!(10)).unwrap();
        let outcome = TransferOutcome::failed(
            &BulkTransferId::new("B1"),
            &TransferId::new("T1"),
            &payment,
            "quote failed: HTTP 500",
        );
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["error"], "quote failed: HTTP 500");
        assert_eq!(json["amount"], "10");
    }
}
