//! Outbound SDK REST client.
//!
//! The SDK exposes plain JSON endpoints and handles FSPIOP headers and
//! signing itself, so requests here are ordinary `application/json` posts:
//!
//! - `POST {url}/bulkQuotes`
//! - `POST {url}/bulkTransfers`
//!
//! A `200` with a readable body completes synchronously, a `202` means the
//! result will arrive by callback, anything else is a rejection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::bulk::{BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload};
use crate::error::Result;
use crate::infrastructure::config::sdk::SdkConfig;
use crate::port::outbound::gateway::{BulkGateway, Submission};

/// HTTP client for the outbound SDK API.
pub struct SdkGateway {
    http: HttpClient,
    base_url: String,
}

impl SdkGateway {
    /// Create a client with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SdkConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.url.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.endpoint(path);
        debug!(url = %url, "POST");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        debug!(url = %url, status = response.status().as_u16(), "Response received");
        Ok(response)
    }

    async fn rejection<T>(response: Response) -> Submission<T> {
        let status = response.status().as_u16();
        let reason = response.text().await.unwrap_or_default();
        Submission::Rejected { status, reason }
    }
}

#[async_trait]
impl BulkGateway for SdkGateway {
    async fn submit_bulk_quote(
        &self,
        payload: &BulkQuotePayload,
    ) -> Result<Submission<BulkQuoteResponse>> {
        let response = self.post("bulkQuotes", payload).await?;

        match response.status() {
            StatusCode::OK => match response.json::<BulkQuoteResponse>().await {
                Ok(body) => Ok(Submission::Completed(body)),
                Err(err) => {
                    debug!(error = %err, "Bulk quote reply has no readable results");
                    Ok(Submission::Accepted)
                }
            },
            StatusCode::ACCEPTED => Ok(Submission::Accepted),
            _ => Ok(Self::rejection(response).await),
        }
    }

    async fn submit_bulk_transfer(&self, payload: &BulkTransferPayload) -> Result<Submission<()>> {
        let response = self.post("bulkTransfers", payload).await?;

        match response.status() {
            StatusCode::OK => Ok(Submission::Completed(())),
            StatusCode::ACCEPTED => Ok(Submission::Accepted),
            _ => Ok(Self::rejection(response).await),
        }
    }

    fn name(&self) -> &'static str {
        "sdk"
    }
}
