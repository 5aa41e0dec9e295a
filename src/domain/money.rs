//! Monetary types for amount and currency representation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Amount represented as a Decimal for precision.
pub type Amount = Decimal;

/// Currency used when a request does not name one.
pub const DEFAULT_CURRENCY: &str = "XOF";

/// ISO 4217 currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// West African CFA franc.
    #[must_use]
    pub fn xof() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::xof()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Amount text paired with its currency, as carried in `transferAmount` and
/// `payeeReceiveAmount`.
///
/// The amount is kept as the text the request carried so it is echoed
/// exactly, whatever its magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: impl Into<String>, currency: Currency) -> Self {
        Self {
            amount: amount.into(),
            currency,
        }
    }
}

/// True when amount text is present and not numerically zero.
///
/// Zero and absent amounts are treated alike: neither produces a
/// `transferAmount` in a quote result. Text that is not a representable
/// decimal (`1e30`, `ten`) still counts as present.
#[must_use]
pub fn is_payable(amount: Option<&str>) -> bool {
    let Some(text) = amount.map(str::trim) else {
        return false;
    };
    if text.is_empty() {
        return false;
    }
    match Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        Ok(value) => !value.is_zero(),
        Err(_) => true,
    }
}

/// Format an amount for the outbound API.
///
/// Whole amounts are written without decimals, anything else is rounded to
/// two places with trailing zeros stripped.
#[must_use]
pub fn format_amount(amount: Amount) -> String {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// Deserialize amount text given as a JSON string or number.
///
/// Numbers are rendered back to text. `null`, blank strings and other JSON
/// types map to `None`; this never fails.
pub(crate) fn deserialize_amount_text<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => return Ok(None),
    };
    Ok((!text.trim().is_empty()).then_some(text))
}

/// Deserialize an optional currency code.
///
/// Blank codes and non-string values map to `None`, so callers fall back to
/// the default currency.
pub(crate) fn deserialize_optional_currency<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Currency>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(code)) if !code.trim().is_empty() => Ok(Some(Currency::new(code))),
        _ => Ok(None),
    }
}
