//! # RecordStore Trait
//!
//! The contract every backend implements. Callers hold an
//! `Arc<dyn RecordStore>` and never learn whether records live in the
//! in-process [`PartitionActor`](crate::PartitionActor) or in Redis.
//!
//! # Example
//!
//! ```rust
//! use order_store::{Day, OrderRecord, PartitionActor, RecordStore, UserId};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
//!     tokio::spawn(actor.run());
//!
//!     let day: Day = "2026-10-16".parse().unwrap();
//!     let record = OrderRecord {
//!         day,
//!         user_id: UserId(1),
//!         display_name: "@alice".into(),
//!         order_text: "Pizza".into(),
//!         written_at: day.date().and_hms_opt(12, 0, 0).unwrap(),
//!     };
//!     client.upsert(record).await.unwrap();
//!
//!     let records = client.list(&day).await.unwrap();
//!     assert_eq!(records.len(), 1);
//!     assert!(client.remove(&day, UserId(1)).await.unwrap());
//! }
//! ```

use crate::error::StoreError;
use crate::record::{Day, OrderRecord, UserId};
use async_trait::async_trait;

/// Day-partitioned storage holding at most one record per user per day.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts the record, replacing any record the same user already has for
    /// that day. Creates the day partition on first write.
    async fn upsert(&self, record: OrderRecord) -> Result<(), StoreError>;

    /// Removes the user's record for the day. Returns whether one existed.
    async fn remove(&self, day: &Day, user_id: UserId) -> Result<bool, StoreError>;

    /// Every record in the day partition, in storage order.
    ///
    /// A day with no partition yields an empty vector.
    async fn list(&self, day: &Day) -> Result<Vec<OrderRecord>, StoreError>;
}
