//! Mock FSPIOP bulk backend.
//!
//! Serves the synthesizer over HTTP so a harness can point its SDK at it:
//!
//! ```text
//! GET  /health                       - liveness
//! POST /bulkQuotes                   - individualQuoteResults for the posted quotes
//! POST /bulkTransfers                - individualTransferResults for the posted transfers
//! PUT  /bulkQuotes/:id               - asynchronous bulk quote result
//! PUT  /bulkTransfers/:id[/callback] - asynchronous bulk transfer result
//! ```
//!
//! POST bodies that are not JSON are answered with empty result lists. The
//! PUT routes form the callback listener a run uses to resolve `202` replies;
//! they refuse bodies that are not JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post, put};
use axum::Router;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::application::callback::CallbackInbox;
use crate::application::synth::{
    build_individual_quote_results, build_individual_transfer_results, Request, RequestContext,
};
use crate::domain::bulk::{IndividualQuoteResult, IndividualTransferResult};
use crate::error::Result;

/// Shared state of the mock backend.
pub struct MockState {
    rng: Mutex<StdRng>,
    callbacks: Arc<CallbackInbox>,
}

impl MockState {
    /// State drawing from `seed`, or from entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
            callbacks: Arc::new(CallbackInbox::new()),
        }
    }

    /// Inbox the callback routes deliver into.
    #[must_use]
    pub fn callbacks(&self) -> Arc<CallbackInbox> {
        Arc::clone(&self.callbacks)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReply {
    status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkQuotesReply {
    bulk_quote_id: Value,
    individual_quote_results: Vec<IndividualQuoteResult>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkTransfersReply {
    bulk_transfer_id: Value,
    bulk_transfer_state: &'static str,
    individual_transfer_results: Vec<IndividualTransferResult>,
}

#[derive(Debug, Serialize)]
struct CallbackReply {
    status: &'static str,
}

/// Build the mock backend router, callback routes included.
pub fn create_router(state: Arc<MockState>) -> Router {
    let callbacks = state.callbacks();
    Router::new()
        .route("/health", get(health))
        .route("/bulkQuotes", post(bulk_quotes))
        .route("/bulkTransfers", post(bulk_transfers))
        .with_state(state)
        .merge(callback_router(callbacks))
        .layer(TraceLayer::new_for_http())
}

/// Routes the SDK calls back on once an accepted bulk completes.
pub fn callback_router(inbox: Arc<CallbackInbox>) -> Router {
    Router::new()
        .route("/bulkQuotes/:bulk_id", put(bulk_quote_callback))
        .route("/bulkTransfers/:bulk_id", put(bulk_transfer_callback))
        .route("/bulkTransfers/:bulk_id/callback", put(bulk_transfer_callback))
        .with_state(inbox)
}

/// Bind `addr` and serve the callback routes in the background.
///
/// Returns the bound address, which differs from `addr` when its port is 0.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn spawn_callback_listener(
    addr: SocketAddr,
    inbox: Arc<CallbackInbox>,
) -> Result<(SocketAddr, JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, "Callback listener ready");

    let app = callback_router(inbox).layer(TraceLayer::new_for_http());
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            warn!(error = %err, "Callback listener stopped");
        }
    });
    Ok((local, handle))
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: Arc<MockState>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Mock backend listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}

async fn health() -> Json<HealthReply> {
    Json(HealthReply { status: "ok" })
}

async fn bulk_quotes(State(state): State<Arc<MockState>>, body: Bytes) -> Json<BulkQuotesReply> {
    let context = context_from(&body);
    let bulk_quote_id = field(&context, "bulkQuoteId");
    let results = build_individual_quote_results(&context, &mut *state.rng.lock());
    debug!(results = results.len(), "Answered bulk quote");

    Json(BulkQuotesReply {
        bulk_quote_id,
        individual_quote_results: results,
    })
}

async fn bulk_transfers(
    State(state): State<Arc<MockState>>,
    body: Bytes,
) -> Json<BulkTransfersReply> {
    let context = context_from(&body);
    let bulk_transfer_id = field(&context, "bulkTransferId");
    let results = build_individual_transfer_results(&context, &mut *state.rng.lock());
    debug!(results = results.len(), "Answered bulk transfer");

    Json(BulkTransfersReply {
        bulk_transfer_id,
        bulk_transfer_state: "COMPLETED",
        individual_transfer_results: results,
    })
}

async fn bulk_quote_callback(
    State(inbox): State<Arc<CallbackInbox>>,
    Path(bulk_id): Path<String>,
    body: Bytes,
) -> std::result::Result<Json<CallbackReply>, StatusCode> {
    let body: Value = serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    info!(bulk_quote_id = %bulk_id, "Bulk quote callback received");
    inbox.deliver(bulk_id, body);
    Ok(Json(CallbackReply { status: "received" }))
}

async fn bulk_transfer_callback(
    Path(bulk_id): Path<String>,
    body: Bytes,
) -> std::result::Result<Json<CallbackReply>, StatusCode> {
    let body: Value = serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let (committed, failed) = committed_counts(&body);
    info!(
        bulk_transfer_id = %bulk_id,
        state = body.get("bulkTransferState").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        committed,
        failed,
        "Bulk transfer callback received"
    );
    Ok(Json(CallbackReply { status: "received" }))
}

/// Individual transfer results in `COMMITTED` state, and the rest.
fn committed_counts(body: &Value) -> (usize, usize) {
    let results = body
        .get("individualTransferResults")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let committed = results
        .iter()
        .filter(|r| r.get("transferState").and_then(Value::as_str) == Some("COMMITTED"))
        .count();
    (committed, results.len() - committed)
}

fn context_from(body: &[u8]) -> RequestContext {
    RequestContext {
        request: Request {
            body: serde_json::from_slice(body).ok(),
        },
    }
}

fn field(context: &RequestContext, name: &str) -> Value {
    context
        .request
        .body
        .as_ref()
        .and_then(|body| body.get(name))
        .cloned()
        .unwrap_or(Value::Null)
}
