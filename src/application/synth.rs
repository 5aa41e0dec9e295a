//! Bulk result synthesizer.
//!
//! Produces the individual results a payee FSP would return for a bulk quote
//! or bulk transfer, filled with random placeholder protocol artifacts. The
//! output mirrors the input one-to-one: same length, same order, identifiers
//! copied verbatim.
//!
//! A request without a body, or whose collection is absent or not a list,
//! yields an empty result list. Entries are read one by one: an entry without
//! an identifier is skipped, every other entry gets a result. Nothing here
//! fails.
//!
//! Randomness is supplied by the caller, so a seeded generator gives
//! reproducible fixtures:
//!
//! ```
//! use bulkpay::application::synth::{build_individual_transfer_results, RequestContext};
//! use rand::{rngs::StdRng, SeedableRng};
//! use serde_json::json;
//!
//! let context = RequestContext::with_body(json!({
//!     "individualTransfers": [{"transferId": "T1"}, {"transferId": "T2"}]
//! }));
//! let results = build_individual_transfer_results(&context, &mut StdRng::seed_from_u64(7));
//!
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].transfer_id.as_str(), "T1");
//! assert_eq!(results[0].fulfilment.len(), 64);
//! ```

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::bulk::{
    IndividualQuoteResult, IndividualQuoteSpec, IndividualTransferResult, IndividualTransferSpec,
    CONDITION_LEN, ILP_PACKET_LEN, QUOTE_EXPIRATION,
};
use crate::domain::money::{is_payable, Currency, Money};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

const INDIVIDUAL_QUOTES: &str = "individualQuotes";
const INDIVIDUAL_TRANSFERS: &str = "individualTransfers";

/// The request as seen by a result builder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub request: Request,
}

/// Incoming request; only its JSON body matters here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub body: Option<Value>,
}

impl RequestContext {
    /// Context around a parsed JSON body.
    #[must_use]
    pub fn with_body(body: Value) -> Self {
        Self {
            request: Request { body: Some(body) },
        }
    }

    /// Context for a request that carried no body.
    #[must_use]
    pub fn without_body() -> Self {
        Self::default()
    }

    fn collection<T: DeserializeOwned>(&self, field: &str) -> Vec<T> {
        let Some(value) = self.request.body.as_ref().and_then(|body| body.get(field)) else {
            return Vec::new();
        };
        let Some(entries) = value.as_array() else {
            if !value.is_null() {
                debug!(field, "Bulk collection is not a list, returning no results");
            }
            return Vec::new();
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match T::deserialize(entry) {
                Ok(item) => Some(item),
                Err(err) => {
                    debug!(field, index, error = %err, "Skipping malformed bulk entry");
                    None
                }
            })
            .collect()
    }
}

/// Build one synthetic quote result per individual quote of the request.
///
/// `transferAmount` and `payeeReceiveAmount` are set, identically, only when
/// the quote carries a non-zero amount, echoed as sent; a missing or blank
/// currency falls back to XOF.
pub fn build_individual_quote_results<R>(
    context: &RequestContext,
    rng: &mut R,
) -> Vec<IndividualQuoteResult>
where
    R: Rng + ?Sized,
{
    context
        .collection::<IndividualQuoteSpec>(INDIVIDUAL_QUOTES)
        .into_iter()
        .map(|quote| {
            let ilp_packet = random_hex(rng, ILP_PACKET_LEN);
            let condition = random_hex(rng, CONDITION_LEN);

            let amount = if is_payable(quote.amount.as_deref()) {
                quote
                    .amount
                    .map(|amount| Money::new(amount, quote.currency.unwrap_or_else(Currency::xof)))
            } else {
                None
            };

            IndividualQuoteResult {
                quote_id: quote.quote_id,
                transfer_amount: amount.clone(),
                payee_receive_amount: amount,
                ilp_packet,
                condition,
                expiration: QUOTE_EXPIRATION.to_string(),
                extension_list: None,
            }
        })
        .collect()
}

/// Build one synthetic transfer result per individual transfer of the request.
pub fn build_individual_transfer_results<R>(
    context: &RequestContext,
    rng: &mut R,
) -> Vec<IndividualTransferResult>
where
    R: Rng + ?Sized,
{
    context
        .collection::<IndividualTransferSpec>(INDIVIDUAL_TRANSFERS)
        .into_iter()
        .map(|transfer| IndividualTransferResult {
            transfer_id: transfer.transfer_id,
            fulfilment: random_hex(rng, CONDITION_LEN),
            extension_list: None,
        })
        .collect()
}

/// `length` characters drawn uniformly from the lowercase hex digits.
fn random_hex<R>(rng: &mut R, length: usize) -> String
where
    R: Rng + ?Sized,
{
    (0..length)
        .map(|_| char::from(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())]))
        .collect()
}
