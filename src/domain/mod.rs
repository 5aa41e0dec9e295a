//! Protocol-agnostic domain types for the bulk payment harness.

pub mod bulk;
pub mod error;
pub mod id;
pub mod money;
pub mod outcome;
pub mod party;
pub mod payment;

pub use bulk::{
    BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload, IndividualQuoteResult,
    IndividualQuoteSpec, IndividualTransferResult, IndividualTransferSpec, QuoteAcceptance,
};
pub use error::DomainError;
pub use id::{BulkQuoteId, BulkTransferId, HomeTransactionId, QuoteId, TransferId};
pub use money::{Amount, Currency, Money};
pub use outcome::{BulkSummary, TransferOutcome, TransferStatus};
pub use party::{Party, PartyIdType};
pub use payment::{Payment, PaymentRow, RejectedRow, RowIssue, ValidatedPayments};
