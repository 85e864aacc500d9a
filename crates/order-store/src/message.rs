//! # Store Messages
//!
//! The request protocol spoken between a [`StoreClient`](crate::StoreClient)
//! and whatever sits on the other end of its channel: the real
//! [`PartitionActor`](crate::PartitionActor) or a
//! [`MockStore`](crate::mock::MockStore).

use crate::error::StoreError;
use crate::record::{Day, OrderRecord, UserId};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// One request per [`RecordStore`](crate::RecordStore) operation.
#[derive(Debug)]
pub enum StoreRequest {
    Upsert {
        record: OrderRecord,
        respond_to: Response<()>,
    },
    Remove {
        day: Day,
        user_id: UserId,
        respond_to: Response<bool>,
    },
    List {
        day: Day,
        respond_to: Response<Vec<OrderRecord>>,
    },
}
