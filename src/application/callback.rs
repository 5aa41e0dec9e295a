//! Inbox for asynchronous bulk callbacks.
//!
//! A backend that answers `202 Accepted` delivers the results later with a
//! `PUT /bulkQuotes/{id}`. The HTTP adapter drops those bodies here, keyed by
//! bulk id, and the processor waits on them.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::debug;

/// Callback bodies received so far, by bulk id.
#[derive(Debug, Default)]
pub struct CallbackInbox {
    results: Mutex<HashMap<String, Value>>,
    notify: Notify,
}

impl CallbackInbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the body for `bulk_id` and wake every waiter.
    ///
    /// A second callback for the same id replaces the first.
    pub fn deliver(&self, bulk_id: impl Into<String>, body: Value) {
        let bulk_id = bulk_id.into();
        debug!(bulk_id = %bulk_id, "Callback delivered");
        self.results.lock().insert(bulk_id, body);
        self.notify.notify_waiters();
    }

    /// Remove and return the body for `bulk_id`, if it arrived.
    pub fn take(&self, bulk_id: &str) -> Option<Value> {
        self.results.lock().remove(bulk_id)
    }

    /// Wait up to `timeout` for the body of `bulk_id`, consuming it.
    pub async fn wait_for(&self, bulk_id: &str, timeout: Duration) -> Option<Value> {
        let deadline = Instant::now() + timeout;
        loop {
            // Registered before the check so a delivery in between still wakes us.
            let notified = self.notify.notified();
            if let Some(body) = self.take(bulk_id) {
                return Some(body);
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.take(bulk_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn delivered_body_is_returned_once() {
        let inbox = CallbackInbox::new();
        inbox.deliver("bq-1", json!({"individualQuoteResults": []}));

        let body = inbox.wait_for("bq-1", Duration::from_millis(10)).await;

        assert_eq!(body, Some(json!({"individualQuoteResults": []})));
        assert_eq!(inbox.take("bq-1"), None);
    }

    #[tokio::test]
    async fn waiter_wakes_on_later_delivery() {
        let inbox = Arc::new(CallbackInbox::new());
        let waiter = {
            let inbox = Arc::clone(&inbox);
            tokio::spawn(async move { inbox.wait_for("bq-2", Duration::from_secs(5)).await })
        };

        tokio::task::yield_now().await;
        inbox.deliver("other", json!(1));
        inbox.deliver("bq-2", json!(2));

        assert_eq!(waiter.await.unwrap(), Some(json!(2)));
        assert_eq!(inbox.take("other"), Some(json!(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_gives_up_at_the_deadline() {
        let inbox = CallbackInbox::new();
        let started = Instant::now();

        let body = inbox.wait_for("never", Duration::from_secs(30)).await;

        assert_eq!(body, None);
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }
}
