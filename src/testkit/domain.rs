//! Builders for domain primitives used across tests.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::domain::money::Currency;
use crate::domain::party::PartyIdType;
use crate::domain::payment::{Payment, PaymentRow};

/// A ten-digit payee identifier derived from `i`.
pub fn id_value(i: usize) -> String {
    format!("{:010}", 1_000_000_000 + i)
}

/// A valid XOF payment numbered `i`, for `100 + i` XOF.
pub fn payment(i: usize) -> Payment {
    Payment {
        id_value: id_value(i),
        id_type: PartyIdType::PersonalId,
        full_name: format!("Payee {i}"),
        amount: Decimal::from(100 + i as u64),
        currency: Currency::xof(),
    }
}

/// `n` valid payments numbered `0..n`.
pub fn payments(n: usize) -> Vec<Payment> {
    (0..n).map(payment).collect()
}

/// A raw row with the given id value and amount, otherwise valid.
pub fn row(id_value: &str, montant: &str) -> PaymentRow {
    PaymentRow {
        type_id: "PERSONAL_ID".into(),
        valeur_id: id_value.into(),
        nom_complet: "Awa Diallo".into(),
        montant: montant.into(),
        devise: "XOF".into(),
    }
}

/// A valid raw row numbered `i`.
pub fn valid_row(i: usize) -> PaymentRow {
    row(&id_value(i), &(100 + i).to_string())
}

/// Render rows as a payment list CSV, header included.
pub fn payment_csv(rows: &[PaymentRow]) -> String {
    let mut text = String::from("type_id,valeur_id,nom_complet,montant,devise\n");
    for row in rows {
        text.push_str(&format!(
            "{},{},{},{},{}\n",
            row.type_id, row.valeur_id, row.nom_complet, row.montant, row.devise
        ));
    }
    text
}

/// A bulk quote body with one `{quoteId, amount, currency}` entry per tuple.
pub fn quote_body(quotes: &[(&str, &str, &str)]) -> Value {
    let quotes: Vec<Value> = quotes
        .iter()
        .map(|(id, amount, currency)| {
            json!({ "quoteId": id, "amount": amount, "currency": currency })
        })
        .collect();
    json!({ "bulkQuoteId": "bq-test", "individualQuotes": quotes })
}

/// A bulk transfer body with one `{transferId}` entry per id.
pub fn transfer_body(ids: &[&str]) -> Value {
    let transfers: Vec<Value> = ids.iter().map(|id| json!({ "transferId": id })).collect();
    json!({ "bulkTransferId": "bt-test", "individualTransfers": transfers })
}

/// Deterministic generator for reproducible fixtures.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
