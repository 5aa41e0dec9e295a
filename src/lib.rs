//! Bulkpay - mobile-money bulk payment test harness.
//!
//! This crate mocks the FSPIOP bulk quote and bulk transfer exchange and
//! drives payment lists through it.
//!
//! # Architecture
//!
//! - **`application::synth`** - Synthetic `individualQuoteResults` and
//!   `individualTransferResults` for a bulk request body
//! - **`application::batch`** - Splits validated payments into bulk batches
//!   and builds their quote and transfer payloads
//! - **`application::processor`** - Quote then transfer per batch, with
//!   retries, producing one outcome per payment
//! - **`application::callback`** - Bodies of asynchronous bulk callbacks,
//!   awaited by bulk id
//! - **`port::outbound::gateway`** - The seam between the processor and
//!   whatever answers bulk requests
//!
//! # Modules
//!
//! - [`domain`] - Identifiers, money, parties, payment rows and bulk wire types
//! - [`application`] - Synthesis, batch planning and processing
//! - [`port`] - Gateway trait
//! - [`adapter`] - CLI, mock HTTP backend, CSV input, SDK and simulated gateways
//! - [`infrastructure`] - Configuration and logging
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use bulkpay::application::synth::{build_individual_quote_results, RequestContext};
//! use rand::SeedableRng;
//! use serde_json::json;
//!
//! let context = RequestContext::with_body(json!({
//!     "individualQuotes": [{ "quoteId": "q-1", "amount": "150" }]
//! }));
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let results = build_individual_quote_results(&context, &mut rng);
//!
//! let amount = results[0].transfer_amount.as_ref().map(|m| m.amount.to_string());
//! assert_eq!(amount.as_deref(), Some("150"));
//! assert_eq!(results[0].ilp_packet.len(), 256);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
