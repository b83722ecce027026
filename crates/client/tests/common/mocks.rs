//! In-memory transport double: canned ABI responses per method, recorded
//! calls, and an optional gate that parks mutations until released.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use parking_lot::Mutex;
use relief_client::transport::{Transport, TransportError, TransportRequest, TxReceipt};
use thiserror::Error;
use tokio::sync::Notify;

#[derive(Clone, Debug, Error)]
pub enum MockError {
    #[error("execution reverted: {0}")]
    Reverted(String),
    #[error("transport fault: {0}")]
    Fault(String),
}

impl TransportError for MockError {
    fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted(_))
    }

    fn revert_reason(&self) -> Option<&str> {
        match self {
            Self::Reverted(reason) => Some(reason),
            Self::Fault(_) => None,
        }
    }
}

/// One call the transport saw; `value` is `None` for reads.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub method: String,
    pub payload: Vec<u8>,
    pub value: Option<u128>,
}

#[derive(Clone, Debug, Default)]
pub struct MockTransport {
    queries: Arc<Mutex<HashMap<String, VecDeque<Result<Vec<u8>, MockError>>>>>,
    receipts: Arc<Mutex<VecDeque<Result<TxReceipt, MockError>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    hold: Arc<Mutex<bool>>,
    release: Arc<Notify>,
}

impl MockTransport {
    pub fn queue_query(&self, method: &str, response: Vec<u8>) {
        self.queries
            .lock()
            .entry(method.to_owned())
            .or_default()
            .push_back(Ok(response));
    }

    pub fn queue_query_failure(&self, method: &str, err: MockError) {
        self.queries
            .lock()
            .entry(method.to_owned())
            .or_default()
            .push_back(Err(err));
    }

    pub fn queue_receipt(&self, receipt: TxReceipt) {
        self.receipts.lock().push_back(Ok(receipt));
    }

    pub fn queue_revert(&self, reason: &str) {
        self.receipts
            .lock()
            .push_back(Err(MockError::Reverted(reason.to_owned())));
    }

    /// Parks every subsequent mutation until [`Self::release_mutations`].
    pub fn hold_mutations(&self) {
        *self.hold.lock() = true;
    }

    pub fn release_mutations(&self) {
        *self.hold.lock() = false;
        self.release.notify_waiters();
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.value.is_some()).count()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    async fn query(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, Self::Error> {
        let method = request.method.to_string();
        self.calls.lock().push(RecordedCall {
            method: method.clone(),
            payload,
            value: None,
        });

        self.queries
            .lock()
            .get_mut(&method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(MockError::Fault(format!("unexpected query `{method}`"))))
    }

    async fn mutate(
        &self,
        request: TransportRequest<'_>,
        payload: Vec<u8>,
        value: u128,
    ) -> Result<TxReceipt, Self::Error> {
        let method = request.method.to_string();
        self.calls.lock().push(RecordedCall {
            method: method.clone(),
            payload,
            value: Some(value),
        });

        if *self.hold.lock() {
            self.release.notified().await;
        }

        self.receipts
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(MockError::Fault(format!("unexpected mutation `{method}`"))))
    }
}

pub fn sample_receipt() -> TxReceipt {
    TxReceipt {
        transaction_hash: "0x8f1d".to_owned(),
        block_number: 42,
        gas_used: 21_000,
        effective_gas_price: 2_000_000_000,
    }
}
