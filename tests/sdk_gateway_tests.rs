//! SDK gateway against a stub HTTP server.

use std::sync::Arc;
use std::time::Duration;

use bulkpay::adapter::inbound::http::spawn_callback_listener;
use bulkpay::adapter::outbound::SdkGateway;
use bulkpay::application::batch::{plan_batches, BulkBatch};
use bulkpay::application::callback::CallbackInbox;
use bulkpay::application::processor::BulkProcessor;
use bulkpay::domain::bulk::BulkQuoteResponse;
use bulkpay::infrastructure::config::processing::ProcessingConfig;
use bulkpay::port::outbound::gateway::{BulkGateway, Submission};
use bulkpay::testkit::config::{parties, processing};
use bulkpay::testkit::domain::payments;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn batch(n: usize) -> BulkBatch {
    plan_batches(&payments(n), 10, &parties()).remove(0)
}

#[tokio::test]
async fn quote_reply_is_parsed_into_results() {
    let server = MockServer::start().await;
    let batch = batch(1);
    let payload = batch.quote_payload();
    let quote_id = payload.individual_quotes[0].quote_id.to_string();

    Mock::given(method("POST"))
        .and(path("/bulkQuotes"))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({ "bulkQuoteId": payload.bulk_quote_id.as_str() })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bulkQuoteId": payload.bulk_quote_id.as_str(),
            "individualQuoteResults": [
                { "quoteId": quote_id, "ilpPacket": "abc", "condition": "def" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = SdkGateway::new(server.uri());
    let submission = gateway.submit_bulk_quote(&payload).await.unwrap();

    let Submission::Completed(response) = submission else {
        panic!("expected completed quote, got {submission:?}");
    };
    assert_eq!(response.individual_quote_results.len(), 1);
    assert_eq!(response.individual_quote_results[0].ilp_packet.as_deref(), Some("abc"));
}

#[tokio::test]
async fn accepted_quote_has_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bulkQuotes"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let gateway = SdkGateway::new(server.uri());
    let submission = gateway.submit_bulk_quote(&batch(1).quote_payload()).await.unwrap();

    assert_eq!(submission, Submission::<BulkQuoteResponse>::Accepted);
}

#[tokio::test]
async fn server_error_is_a_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bulkTransfers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let gateway = SdkGateway::new(format!("{}/", server.uri()));
    let batch = batch(1);
    let transfer = batch.transfer_payload(&BulkQuoteResponse::default());
    let submission = gateway.submit_bulk_transfer(&transfer).await.unwrap();

    assert_eq!(
        submission,
        Submission::Rejected {
            status: 500,
            reason: "internal".into()
        }
    );
}

#[tokio::test]
async fn unreachable_sdk_is_an_error() {
    let gateway = SdkGateway::new("http://127.0.0.1:9");
    let result = gateway.submit_bulk_quote(&batch(1).quote_payload()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn processor_runs_a_batch_through_the_sdk() {
    let server = MockServer::start().await;

    // Echo the quote ids back, as the SDK does for a synchronous bulk quote.
    Mock::given(method("POST"))
        .and(path("/bulkQuotes"))
        .respond_with(|request: &wiremock::Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            let results: Vec<serde_json::Value> = body["individualQuotes"]
                .as_array()
                .unwrap()
                .iter()
                .map(|q| json!({ "quoteId": q["quoteId"], "ilpPacket": "aa", "condition": "bb" }))
                .collect();
            ResponseTemplate::new(200).set_body_json(json!({ "individualQuoteResults": results }))
        })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bulkTransfers"))
        .and(body_partial_json(json!({
            "individualTransfers": [{ "ilpPacket": "aa", "condition": "bb" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let processor = BulkProcessor::new(SdkGateway::new(server.uri()), processing(10), parties());
    let outcomes = processor.process(&payments(1)).await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_success(), "{:?}", outcomes[0].error);
}

#[tokio::test]
async fn accepted_quote_is_completed_by_a_callback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bulkQuotes"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bulkTransfers"))
        .and(body_partial_json(json!({
            "individualTransfers": [{ "ilpPacket": "from-callback", "condition": "cc" }]
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let inbox = Arc::new(CallbackInbox::new());
    let (listener, handle) = spawn_callback_listener("127.0.0.1:0".parse().unwrap(), Arc::clone(&inbox))
        .await
        .unwrap();

    // Play the SDK: once the bulk quote is posted, PUT its results back.
    let sdk_uri = server.uri();
    let callback = tokio::spawn(async move {
        let quote = loop {
            let requests = server.received_requests().await.unwrap_or_default();
            if let Some(request) = requests.iter().find(|r| r.url.path() == "/bulkQuotes") {
                break serde_json::from_slice::<serde_json::Value>(&request.body).unwrap();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        };
        let results: Vec<serde_json::Value> = quote["individualQuotes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| json!({ "quoteId": q["quoteId"], "ilpPacket": "from-callback", "condition": "cc" }))
            .collect();
        let reply = reqwest::Client::new()
            .put(format!("http://{listener}/bulkQuotes/{}", quote["bulkQuoteId"].as_str().unwrap()))
            .json(&json!({ "individualQuoteResults": results }))
            .send()
            .await
            .unwrap();
        assert_eq!(reply.status(), 200);
        server
    });

    let config = ProcessingConfig {
        callback_timeout_ms: 5_000,
        ..processing(10)
    };
    let processor = BulkProcessor::new(SdkGateway::new(sdk_uri), config, parties()).with_callbacks(inbox);
    let outcomes = processor.process(&payments(1)).await;

    let server = callback.await.unwrap();
    handle.abort();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_success(), "{:?}", outcomes[0].error);
    server.verify().await;
}
