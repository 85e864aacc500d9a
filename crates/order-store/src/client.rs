//! # Store Client
//!
//! The sending half of the store actor. Every request is bounded by a
//! timeout, and every channel failure is reported as
//! [`StoreError::StorageUnavailable`].

use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::{Day, OrderRecord, UserId};
use crate::store::RecordStore;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A cloneable handle for talking to a [`PartitionActor`](crate::PartitionActor)
/// (or a [`MockStore`](crate::mock::MockStore)).
///
/// * **Cloneable** - holds only a sender, so cloning is inexpensive.
/// * **Bounded** - a round trip that exceeds `request_timeout` fails instead
///   of waiting forever on a stalled actor.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    request_timeout: Duration,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, request_timeout: Duration) -> Self {
        Self {
            sender,
            request_timeout,
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        let round_trip = async {
            self.sender
                .send(build(respond_to))
                .await
                .map_err(|_| StoreError::unavailable("store actor closed"))?;
            response
                .await
                .map_err(|_| StoreError::unavailable("store actor dropped response channel"))?
        };
        tokio::time::timeout(self.request_timeout, round_trip)
            .await
            .map_err(|_| {
                StoreError::unavailable(format!(
                    "store did not answer within {}ms",
                    self.request_timeout.as_millis()
                ))
            })?
    }
}

#[async_trait]
impl RecordStore for StoreClient {
    async fn upsert(&self, record: OrderRecord) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Upsert { record, respond_to })
            .await
    }

    async fn remove(&self, day: &Day, user_id: UserId) -> Result<bool, StoreError> {
        let day = *day;
        self.request(|respond_to| StoreRequest::Remove {
            day,
            user_id,
            respond_to,
        })
        .await
    }

    async fn list(&self, day: &Day) -> Result<Vec<OrderRecord>, StoreError> {
        let day = *day;
        self.request(|respond_to| StoreRequest::List { day, respond_to })
            .await
    }
}
