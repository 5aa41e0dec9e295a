//! Scripted gateway for processor tests.
//!
//! Answers are queued per operation and replayed in order. Once a queue is
//! down to its last answer that answer repeats, so a single failing answer
//! fails every attempt.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::callback::CallbackInbox;
use crate::domain::bulk::{
    BulkQuotePayload, BulkQuoteResponse, BulkTransferPayload, QuoteAcceptance,
};
use crate::error::{Error, Result};
use crate::port::outbound::gateway::{BulkGateway, Submission};

/// Placeholder ILP packet returned by echoed quotes.
pub const ECHO_ILP_PACKET: &str = "ilp-echo";
/// Placeholder condition returned by echoed quotes.
pub const ECHO_CONDITION: &str = "condition-echo";

/// A queued answer to a bulk quote.
#[derive(Debug, Clone)]
pub enum QuoteAnswer {
    /// Quote results for the first `n` quotes of the payload.
    EchoFirst(usize),
    /// Quote results for every quote of the payload.
    Echo,
    Reply(Submission<BulkQuoteResponse>),
    /// Answer `Accepted`, then deliver the echo to the inbox after the delay.
    EchoLater(Arc<CallbackInbox>, Duration),
    /// Transport failure with this message.
    Fail(String),
}

/// A queued answer to a bulk transfer.
#[derive(Debug, Clone)]
pub enum TransferAnswer {
    Reply(Submission<()>),
    /// Transport failure with this message.
    Fail(String),
}

struct Script<T> {
    queue: Mutex<VecDeque<T>>,
    calls: AtomicUsize,
}

impl<T: Clone> Script<T> {
    fn new(answers: Vec<T>) -> Self {
        Self {
            queue: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn next(&self) -> Option<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.queue.lock();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Gateway replaying scripted quote and transfer answers.
pub struct ScriptedGateway {
    quotes: Script<QuoteAnswer>,
    transfers: Script<TransferAnswer>,
    transfer_payloads: Mutex<Vec<BulkTransferPayload>>,
}

impl ScriptedGateway {
    pub fn new(quotes: Vec<QuoteAnswer>, transfers: Vec<TransferAnswer>) -> Self {
        Self {
            quotes: Script::new(quotes),
            transfers: Script::new(transfers),
            transfer_payloads: Mutex::new(Vec::new()),
        }
    }

    /// Echo every quote and complete every transfer.
    pub fn accepting() -> Self {
        Self::new(
            vec![QuoteAnswer::Echo],
            vec![TransferAnswer::Reply(Submission::Completed(()))],
        )
    }

    pub fn quote_calls(&self) -> usize {
        self.quotes.calls()
    }

    pub fn transfer_calls(&self) -> usize {
        self.transfers.calls()
    }

    /// Transfer payloads received, one per attempt.
    pub fn transfer_payloads(&self) -> Vec<BulkTransferPayload> {
        self.transfer_payloads.lock().clone()
    }
}

fn echo(payload: &BulkQuotePayload, limit: usize) -> BulkQuoteResponse {
    BulkQuoteResponse {
        bulk_quote_id: Some(payload.bulk_quote_id.clone()),
        individual_quote_results: payload
            .individual_quotes
            .iter()
            .take(limit)
            .map(|quote| QuoteAcceptance {
                quote_id: quote.quote_id.clone(),
                ilp_packet: Some(ECHO_ILP_PACKET.to_string()),
                condition: Some(ECHO_CONDITION.to_string()),
            })
            .collect(),
    }
}

#[async_trait]
impl BulkGateway for ScriptedGateway {
    async fn submit_bulk_quote(
        &self,
        payload: &BulkQuotePayload,
    ) -> Result<Submission<BulkQuoteResponse>> {
        match self.quotes.next() {
            Some(QuoteAnswer::Echo) => Ok(Submission::Completed(echo(payload, usize::MAX))),
            Some(QuoteAnswer::EchoFirst(n)) => Ok(Submission::Completed(echo(payload, n))),
            Some(QuoteAnswer::Reply(submission)) => Ok(submission),
            Some(QuoteAnswer::EchoLater(inbox, delay)) => {
                let bulk_id = payload.bulk_quote_id.to_string();
                let body = serde_json::to_value(echo(payload, usize::MAX))?;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    inbox.deliver(bulk_id, body);
                });
                Ok(Submission::Accepted)
            }
            Some(QuoteAnswer::Fail(message)) => Err(Error::Gateway(message)),
            None => Err(Error::Gateway("no scripted quote answer".into())),
        }
    }

    async fn submit_bulk_transfer(&self, payload: &BulkTransferPayload) -> Result<Submission<()>> {
        self.transfer_payloads.lock().push(payload.clone());
        match self.transfers.next() {
            Some(TransferAnswer::Reply(submission)) => Ok(submission),
            Some(TransferAnswer::Fail(message)) => Err(Error::Gateway(message)),
            None => Err(Error::Gateway("no scripted transfer answer".into())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
