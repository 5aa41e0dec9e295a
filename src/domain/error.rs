//! Domain validation errors for core domain types.
//!
//! These errors are returned by constructors that validate inputs, such as
//! [`Payment::single`](crate::domain::payment::Payment::single).
//!
//! # Examples
//!
//! ```
//! use bulkpay::domain::error::DomainError;
//! use bulkpay::domain::payment::Payment;
//! use rust_decimal::Decimal;
//!
//! let result = Payment::single("   ", Decimal::ONE_HUNDRED);
//! assert!(matches!(result, Err(DomainError::MissingField { field: "id" })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty or absent.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Amounts sent to a payee must be strictly positive.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The invalid amount that was provided.
        amount: rust_decimal::Decimal,
    },

    /// Amount text that does not parse as a decimal.
    #[error("invalid amount '{raw}'")]
    InvalidAmount {
        /// The raw text that failed to parse.
        raw: String,
    },
}
