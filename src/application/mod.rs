//! Application layer: result synthesis, batch planning and bulk processing.

pub mod batch;
pub mod callback;
pub mod processor;
pub mod synth;

pub use batch::{plan_batches, BulkBatch, TrackedPayment};
pub use callback::CallbackInbox;
pub use processor::BulkProcessor;
pub use synth::{build_individual_quote_results, build_individual_transfer_results, RequestContext};
