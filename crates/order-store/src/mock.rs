//! # Mock Store & Testing Guide
//!
//! [`MockStore`] hands out a real [`StoreClient`], but the other end of the
//! channel is a scripted responder instead of a [`PartitionActor`](crate::PartitionActor).
//! Code under test cannot tell the difference, which makes it easy to inject
//! failures that are awkward to produce against a live backend.
//!
//! ## When to use Mocks vs the Real Actor
//!
//! | Feature | MockStore | PartitionActor |
//! |---------|-----------|----------------|
//! | **State** | None (scripted answers) | Real partitions |
//! | **Error Injection** | Easy (`return_err`) | Only closed/stalled channels |
//! | **Use Case** | Logic *around* the store | The store itself, full system |
//!
//! ## Fluent Expectations
//!
//! ```rust
//! use order_store::mock::MockStore;
//! use order_store::{Day, RecordStore, StoreError, UserId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::new();
//!     mock.expect_remove().return_ok(true);
//!     mock.expect_list().return_err(StoreError::unavailable("connection refused"));
//!
//!     let client = mock.client();
//!     let day: Day = "2026-10-16".parse().unwrap();
//!
//!     assert!(client.remove(&day, UserId(1)).await.unwrap());
//!     assert!(matches!(
//!         client.list(&day).await,
//!         Err(StoreError::StorageUnavailable(_))
//!     ));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Inspecting Raw Requests
//!
//! When a test needs to look at what was sent, use [`create_mock_client`] and
//! answer each request by hand with [`expect_upsert`], [`expect_remove`] or
//! [`expect_list`].

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::record::{Day, OrderRecord, UserId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

const MOCK_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Upsert {
        response: Result<(), StoreError>,
    },
    Remove {
        response: Result<bool, StoreError>,
    },
    List {
        response: Result<Vec<OrderRecord>, StoreError>,
    },
}

/// A scripted store that answers requests from a queue of expectations.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation panics the responder task, which the caller observes as
/// [`StoreError::StorageUnavailable`].
pub struct MockStore {
    client: StoreClient,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    upserted: Arc<Mutex<Vec<OrderRecord>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation>>> =
            Arc::new(Mutex::new(VecDeque::new()));
        let upserted = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let upserted_clone = upserted.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Upsert { record, respond_to },
                        Some(Expectation::Upsert { response }),
                    ) => {
                        upserted_clone.lock().unwrap().push(record);
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Remove { respond_to, .. },
                        Some(Expectation::Remove { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender, MOCK_TIMEOUT),
            expectations,
            upserted,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    pub fn expect_upsert(&mut self) -> ExpectationBuilder<()> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Upsert { response }
        })
    }

    pub fn expect_remove(&mut self) -> ExpectationBuilder<bool> {
        ExpectationBuilder::new(self.expectations.clone(), |response| {
            Expectation::Remove { response }
        })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<Vec<OrderRecord>> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::List {
            response,
        })
    }

    /// Records received by upsert requests so far, in arrival order.
    pub fn upserted(&self) -> Vec<OrderRecord> {
        self.upserted.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Finishes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T> {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    wrap: fn(Result<T, StoreError>) -> Expectation,
}

impl<T> ExpectationBuilder<T> {
    fn new(
        expectations: Arc<Mutex<VecDeque<Expectation>>>,
        wrap: fn(Result<T, StoreError>) -> Expectation,
    ) -> Self {
        Self { expectations, wrap }
    }

    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, StoreError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land in the returned receiver.
pub fn create_mock_client(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender, MOCK_TIMEOUT), receiver)
}

/// Waits for the next request and returns it if it is an upsert.
pub async fn expect_upsert(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(OrderRecord, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Upsert { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a remove.
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(Day, UserId, Response<bool>)> {
    match receiver.recv().await {
        Some(StoreRequest::Remove {
            day,
            user_id,
            respond_to,
        }) => Some((day, user_id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a list.
pub async fn expect_list(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(Day, Response<Vec<OrderRecord>>)> {
    match receiver.recv().await {
        Some(StoreRequest::List { day, respond_to }) => Some((day, respond_to)),
        _ => None,
    }
}
