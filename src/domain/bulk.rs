//! Bulk quote and bulk transfer records.
//!
//! Two families live here:
//!
//! - the inbound side of a mock backend: the individual quote/transfer specs a
//!   bulk request carries, and the synthetic results returned for them;
//! - the outbound side of the harness: the payloads sent to the SDK and the
//!   bulk quote response read back from it.
//!
//! Field names follow the FSPIOP JSON encoding (camelCase).

use serde::{Deserialize, Serialize};

use super::id::{BulkQuoteId, BulkTransferId, HomeTransactionId, QuoteId, TransferId};
use super::money::{deserialize_amount_text, deserialize_optional_currency, Currency, Money};
use super::party::Party;

/// Expiration stamped on every synthetic quote result.
pub const QUOTE_EXPIRATION: &str = "2040-01-01T01:01:01.001Z";

/// Length of a synthetic ILP packet, in hex characters.
pub const ILP_PACKET_LEN: usize = 256;

/// Length of a synthetic condition or fulfilment, in hex characters.
pub const CONDITION_LEN: usize = 64;

/// One quote inside an incoming bulk quote request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualQuoteSpec {
    pub quote_id: QuoteId,
    /// Amount text as sent; blank counts as absent.
    #[serde(default, deserialize_with = "deserialize_amount_text")]
    pub amount: Option<String>,
    /// Currency code; blank counts as absent.
    #[serde(default, deserialize_with = "deserialize_optional_currency")]
    pub currency: Option<Currency>,
}

/// Synthetic result for one quote of a bulk quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualQuoteResult {
    pub quote_id: QuoteId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_receive_amount: Option<Money>,
    pub ilp_packet: String,
    pub condition: String,
    pub expiration: String,
    pub extension_list: Option<serde_json::Value>,
}

/// One transfer inside an incoming bulk transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualTransferSpec {
    pub transfer_id: TransferId,
}

/// Synthetic result for one transfer of a bulk transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualTransferResult {
    pub transfer_id: TransferId,
    pub fulfilment: String,
    pub extension_list: Option<serde_json::Value>,
}

/// How the amount of a quote is interpreted by the payee FSP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountType {
    Send,
    Receive,
}

/// One quote of an outbound bulk quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundQuote {
    pub quote_id: QuoteId,
    pub to: Party,
    pub amount_type: AmountType,
    pub currency: Currency,
    /// Amount as formatted by [`format_amount`](super::money::format_amount).
    pub amount: String,
    pub transaction_type: String,
    pub note: String,
}

/// Outbound bulk quote payload for `POST /bulkQuotes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkQuotePayload {
    pub home_transaction_id: HomeTransactionId,
    pub bulk_quote_id: BulkQuoteId,
    pub from: Party,
    pub individual_quotes: Vec<OutboundQuote>,
}

/// One transfer of an outbound bulk transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundTransfer {
    pub transfer_id: TransferId,
    pub to: Party,
    pub amount_type: AmountType,
    pub currency: Currency,
    pub amount: String,
    pub transaction_type: String,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilp_packet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Outbound bulk transfer payload for `POST /bulkTransfers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTransferPayload {
    pub home_transaction_id: HomeTransactionId,
    pub bulk_transfer_id: BulkTransferId,
    pub bulk_quote_id: BulkQuoteId,
    pub from: Party,
    pub individual_transfers: Vec<OutboundTransfer>,
}

/// The parts of an individual quote result the harness relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAcceptance {
    pub quote_id: QuoteId,
    #[serde(default)]
    pub ilp_packet: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl From<IndividualQuoteResult> for QuoteAcceptance {
    fn from(result: IndividualQuoteResult) -> Self {
        Self {
            quote_id: result.quote_id,
            ilp_packet: Some(result.ilp_packet),
            condition: Some(result.condition),
        }
    }
}

/// Bulk quote response read back from the SDK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkQuoteResponse {
    #[serde(default)]
    pub bulk_quote_id: Option<BulkQuoteId>,
    #[serde(default)]
    pub individual_quote_results: Vec<QuoteAcceptance>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_spec_keeps_amount_text_as_sent() {
        let text: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q1", "amount": "100.50"})).unwrap();
        let number: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q2", "amount": 25})).unwrap();
        let huge: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q3", "amount": 1e30})).unwrap();
        let garbage: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q4", "amount": "ten"})).unwrap();

        assert_eq!(text.amount.as_deref(), Some("100.50"));
        assert_eq!(number.amount.as_deref(), Some("25"));
        assert_eq!(huge.amount.as_deref(), Some("1e30"));
        assert_eq!(garbage.amount.as_deref(), Some("ten"));
    }

    #[test]
    fn quote_spec_treats_empty_or_missing_amount_as_absent() {
        let empty: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q1", "amount": ""})).unwrap();
        let missing: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q2", "currency": "USD"})).unwrap();
        let null: IndividualQuoteSpec =
            serde_json::from_value(json!({"quoteId": "Q3", "amount": null})).unwrap();

        assert_eq!(empty.amount, None);
        assert_eq!(missing.amount, None);
        assert_eq!(missing.currency, Some(Currency::new("USD")));
        assert_eq!(null.amount, None);
    }

    #[test]
    fn quote_spec_treats_blank_currency_as_absent() {
        for currency in [json!(""), json!("   "), json!(null), json!(7)] {
            let spec: IndividualQuoteSpec = serde_json::from_value(
                json!({"quoteId": "Q1", "amount": "1", "currency": currency}),
            )
            .unwrap();
            assert_eq!(spec.currency, None, "{currency}");
        }
    }

    #[test]
    fn quote_result_omits_absent_amounts_but_keeps_null_extension_list() {
        let result = IndividualQuoteResult {
            quote_id: QuoteId::new("Q1"),
            transfer_amount: None,
            payee_receive_amount: None,
            ilp_packet: "ab".into(),
            condition: "cd".into(),
            expiration: QUOTE_EXPIRATION.into(),
            extension_list: None,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert!(json.get("transferAmount").is_none());
        assert!(json.get("payeeReceiveAmount").is_none());
        assert_eq!(json["extensionList"], serde_json::Value::Null);
        assert_eq!(json["expiration"], "2040-01-01T01:01:01.001Z");
    }

    #[test]
    fn bulk_quote_response_tolerates_missing_fields() {
        let response: BulkQuoteResponse = serde_json::from_value(json!({
            "individualQuoteResults": [{"quoteId": "Q1"}]
        }))
        .unwrap();

        assert_eq!(response.bulk_quote_id, None);
        assert_eq!(response.individual_quote_results[0].ilp_packet, None);
    }
}
