//! Payments to be sent through the harness.
//!
//! A payment list arrives as CSV rows ([`PaymentRow`]). Each row is checked
//! against the rules the scheme accepts for bulk disbursements before it is
//! turned into a [`Payment`]:
//!
//! - the id type is `PERSONAL_ID`,
//! - the id value is exactly ten digits,
//! - the currency is XOF,
//! - the amount is a positive decimal.
//!
//! A row can fail several rules at once; all of them are reported.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Amount, Currency, DEFAULT_CURRENCY};
use super::party::PartyIdType;

const ID_VALUE_LEN: usize = 10;

/// Raw payment list row, as read from CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaymentRow {
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub valeur_id: String,
    #[serde(default)]
    pub nom_complet: String,
    #[serde(default)]
    pub montant: String,
    #[serde(default)]
    pub devise: String,
}

/// A rule a payment row failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIssue {
    InvalidIdType,
    InvalidIdValue,
    UnsupportedCurrency,
    NonPositiveAmount,
    MalformedAmount,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidIdType => "invalid id type",
            Self::InvalidIdValue => "invalid id value",
            Self::UnsupportedCurrency => "unsupported currency",
            Self::NonPositiveAmount => "amount must be positive",
            Self::MalformedAmount => "malformed amount",
        };
        f.write_str(text)
    }
}

/// A row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based index of the data row (header excluded).
    pub line: usize,
    pub id_value: String,
    pub issues: Vec<RowIssue>,
}

impl RejectedRow {
    /// Issues joined for display.
    #[must_use]
    pub fn reason(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A validated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payment {
    pub id_value: String,
    pub id_type: PartyIdType,
    pub full_name: String,
    pub amount: Amount,
    pub currency: Currency,
}

impl Payment {
    /// Build the payment for a single transfer request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingField`] for a blank id and
    /// [`DomainError::NonPositiveAmount`] for a zero or negative amount.
    pub fn single(id: &str, amount: Amount) -> Result<Self, DomainError> {
        let id_value = id.trim();
        if id_value.is_empty() {
            return Err(DomainError::MissingField { field: "id" });
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }

        Ok(Self {
            id_value: id_value.to_string(),
            id_type: PartyIdType::PersonalId,
            full_name: format!("Beneficiary {id_value}"),
            amount,
            currency: Currency::xof(),
        })
    }
}

/// Parse user-supplied amount text.
///
/// # Errors
///
/// Returns [`DomainError::MissingField`] when blank and
/// [`DomainError::InvalidAmount`] when it is not a decimal.
pub fn parse_amount(raw: &str) -> Result<Amount, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField { field: "amount" });
    }
    Decimal::from_str(trimmed).map_err(|_| DomainError::InvalidAmount {
        raw: trimmed.to_string(),
    })
}

impl PaymentRow {
    /// Validate this row, collecting every failed rule.
    ///
    /// # Errors
    ///
    /// Returns a [`RejectedRow`] listing all the issues found.
    pub fn validate(&self, line: usize) -> Result<Payment, RejectedRow> {
        let mut issues = Vec::new();
        let id_value = self.valeur_id.trim();

        if self.type_id.trim() != "PERSONAL_ID" {
            issues.push(RowIssue::InvalidIdType);
        }
        if id_value.len() != ID_VALUE_LEN || !id_value.bytes().all(|b| b.is_ascii_digit()) {
            issues.push(RowIssue::InvalidIdValue);
        }
        if self.devise.trim() != DEFAULT_CURRENCY {
            issues.push(RowIssue::UnsupportedCurrency);
        }

        let amount = match Decimal::from_str(self.montant.trim()) {
            Ok(amount) if amount > Decimal::ZERO => Some(amount),
            Ok(_) => {
                issues.push(RowIssue::NonPositiveAmount);
                None
            }
            Err(_) => {
                issues.push(RowIssue::MalformedAmount);
                None
            }
        };

        match amount {
            Some(amount) if issues.is_empty() => Ok(Payment {
                id_value: id_value.to_string(),
                id_type: PartyIdType::PersonalId,
                full_name: self.nom_complet.trim().to_string(),
                amount,
                currency: Currency::xof(),
            }),
            _ => Err(RejectedRow {
                line,
                id_value: id_value.to_string(),
                issues,
            }),
        }
    }
}

/// Accepted payments and rejected rows of a payment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedPayments {
    pub accepted: Vec<Payment>,
    pub rejected: Vec<RejectedRow>,
}

impl ValidatedPayments {
    /// Number of rows seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Validate rows in order, partitioning them into accepted and rejected.
#[must_use]
pub fn validate_rows(rows: &[PaymentRow]) -> ValidatedPayments {
    let mut validated = ValidatedPayments::default();
    for (index, row) in rows.iter().enumerate() {
        match row.validate(index + 1) {
            Ok(payment) => validated.accepted.push(payment),
            Err(rejected) => validated.rejected.push(rejected),
        }
    }
    validated
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(type_id: &str, id: &str, amount: &str, currency: &str) -> PaymentRow {
        PaymentRow {
            type_id: type_id.into(),
            valeur_id: id.into(),
            nom_complet: "Awa Traore".into(),
            montant: amount.into(),
            devise: currency.into(),
        }
    }

    #[test]
    fn well_formed_row_is_accepted() {
        let payment = row("PERSONAL_ID", " 0123456789 ", "5000", "XOF")
            .validate(1)
            .unwrap();

        assert_eq!(payment.id_value, "0123456789");
        assert_eq!(payment.amount, dec!(5000));
        assert_eq!(payment.currency, Currency::xof());
        assert_eq!(payment.full_name, "Awa Traore");
    }

    #[test]
    fn every_failed_rule_is_reported() {
        let rejected = row("MSISDN", "12ab", "-3", "EUR").validate(4).unwrap_err();

        assert_eq!(rejected.line, 4);
        assert_eq!(
            rejected.issues,
            vec![
                RowIssue::InvalidIdType,
                RowIssue::InvalidIdValue,
                RowIssue::UnsupportedCurrency,
                RowIssue::NonPositiveAmount,
            ]
        );
        assert_eq!(
            rejected.reason(),
            "invalid id type, invalid id value, unsupported currency, amount must be positive"
        );
    }

    #[test]
    fn unparsable_amount_is_malformed() {
        let rejected = row("PERSONAL_ID", "0123456789", "lots", "XOF")
            .validate(1)
            .unwrap_err();
        assert_eq!(rejected.issues, vec![RowIssue::MalformedAmount]);
    }

    #[test]
    fn id_value_must_be_exactly_ten_digits() {
        assert!(row("PERSONAL_ID", "012345678", "1", "XOF").validate(1).is_err());
        assert!(row("PERSONAL_ID", "01234567890", "1", "XOF").validate(1).is_err());
    }

    #[test]
    fn validate_rows_preserves_order_and_line_numbers() {
        let rows = vec![
            row("PERSONAL_ID", "0000000001", "10", "XOF"),
            row("PERSONAL_ID", "bad", "10", "XOF"),
            row("PERSONAL_ID", "0000000003", "30", "XOF"),
        ];
        let validated = validate_rows(&rows);

        assert_eq!(validated.total(), 3);
        assert_eq!(validated.accepted[0].id_value, "0000000001");
        assert_eq!(validated.accepted[1].id_value, "0000000003");
        assert_eq!(validated.rejected[0].line, 2);
    }

    #[test]
    fn single_payment_trims_id_and_uses_defaults() {
        let payment = Payment::single(" 22990000001 ", dec!(5000)).unwrap();

        assert_eq!(payment.id_value, "22990000001");
        assert_eq!(payment.full_name, "Beneficiary 22990000001");
        assert_eq!(payment.id_type, PartyIdType::PersonalId);
        assert_eq!(payment.currency.as_str(), "XOF");
    }

    #[test]
    fn single_payment_rejects_non_positive_amount() {
        assert_eq!(
            Payment::single("1", dec!(0)),
            Err(DomainError::NonPositiveAmount { amount: dec!(0) })
        );
    }

    #[test]
    fn parse_amount_distinguishes_blank_and_invalid() {
        assert_eq!(
            parse_amount("  "),
            Err(DomainError::MissingField { field: "amount" })
        );
        assert!(matches!(
            parse_amount("1,5"),
            Err(DomainError::InvalidAmount { .. })
        ));
        assert_eq!(parse_amount(" 12.5 "), Ok(dec!(12.5)));
    }
}
