//! # Partition Actor
//!
//! The in-process store backend. A single `PartitionActor` owns every day
//! partition and processes [`StoreRequest`]s one at a time, which makes each
//! upsert and remove linearizable without any locks.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::record::{Day, OrderRecord, UserId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type Partition = HashMap<UserId, OrderRecord>;

/// The actor that owns all day partitions.
///
/// # Concurrency Model
/// Any number of [`StoreClient`] clones may send requests concurrently, but the
/// actor drains its channel sequentially. Two rapid upserts for the same
/// `(day, user_id)` are therefore applied in arrival order and the later one
/// wins; a `List` observes either all of a write or none of it.
///
/// # Usage Pattern
///
/// ```rust
/// use order_store::{Day, PartitionActor, RecordStore};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     // 1. Create
///     let (actor, client) = PartitionActor::new(32, Duration::from_secs(2));
///
///     // 2. Run
///     let handle = tokio::spawn(actor.run());
///
///     // 3. Use
///     let day: Day = "2026-10-16".parse().unwrap();
///     assert!(client.list(&day).await.unwrap().is_empty());
///
///     // 4. Dropping the last client stops the loop
///     drop(client);
///     handle.await.unwrap();
/// }
/// ```
pub struct PartitionActor {
    receiver: mpsc::Receiver<StoreRequest>,
    partitions: HashMap<Day, Partition>,
}

impl PartitionActor {
    /// Creates a new `PartitionActor` and its associated [`StoreClient`].
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Capacity of the request channel. When it is full,
    ///   clients wait for space (bounded by their timeout).
    /// * `request_timeout` - Upper bound the client puts on each round trip.
    pub fn new(buffer_size: usize, request_timeout: Duration) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            partitions: HashMap::new(),
        };
        (actor, StoreClient::new(sender, request_timeout))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!("Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Upsert { record, respond_to } => {
                    let _ = respond_to.send(self.upsert(record));
                }
                StoreRequest::Remove {
                    day,
                    user_id,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.remove(day, user_id)));
                }
                StoreRequest::List { day, respond_to } => {
                    let _ = respond_to.send(Ok(self.list(&day)));
                }
            }
        }

        info!(partitions = self.partitions.len(), "Store actor shutdown");
    }

    fn upsert(&mut self, record: OrderRecord) -> Result<(), StoreError> {
        if let Err(e) = record.validate() {
            warn!(day = %record.day, user_id = %record.user_id, error = %e, "Upsert rejected");
            return Err(e);
        }
        let day = record.day;
        let user_id = record.user_id;
        let partition = self.partitions.entry(day).or_default();
        let replaced = partition.insert(user_id, record).is_some();
        info!(%day, %user_id, replaced, size = partition.len(), "Upserted");
        Ok(())
    }

    fn remove(&mut self, day: Day, user_id: UserId) -> bool {
        let Some(partition) = self.partitions.get_mut(&day) else {
            debug!(%day, %user_id, "Remove on missing partition");
            return false;
        };
        let removed = partition.remove(&user_id).is_some();
        if partition.is_empty() {
            self.partitions.remove(&day);
        }
        info!(%day, %user_id, removed, "Removed");
        removed
    }

    fn list(&self, day: &Day) -> Vec<OrderRecord> {
        let records: Vec<OrderRecord> = self
            .partitions
            .get(day)
            .map(|partition| partition.values().cloned().collect())
            .unwrap_or_default();
        debug!(%day, count = records.len(), "Listed");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;

    fn record(user: i64, text: &str, minute: u32) -> OrderRecord {
        let day: Day = "2026-10-16".parse().unwrap();
        OrderRecord {
            day,
            user_id: UserId(user),
            display_name: format!("User {user}"),
            order_text: text.to_string(),
            written_at: day.date().and_hms_opt(12, minute, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_record_for_same_user() {
        let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
        tokio::spawn(actor.run());

        client.upsert(record(1, "Pizza", 0)).await.unwrap();
        client.upsert(record(1, "Sushi", 5)).await.unwrap();

        let day = record(1, "", 0).day;
        let records = client.list(&day).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_text, "Sushi");
        assert_eq!(records[0].written_at.format("%H:%M").to_string(), "12:05");
    }

    #[tokio::test]
    async fn test_remove_reports_whether_record_existed() {
        let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
        tokio::spawn(actor.run());

        let day = record(1, "Pizza", 0).day;
        assert!(!client.remove(&day, UserId(1)).await.unwrap());

        client.upsert(record(1, "Pizza", 0)).await.unwrap();
        assert!(client.remove(&day, UserId(1)).await.unwrap());
        assert!(!client.remove(&day, UserId(1)).await.unwrap());
        assert!(client.list(&day).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partitions_are_isolated_by_day() {
        let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
        tokio::spawn(actor.run());

        client.upsert(record(1, "Pizza", 0)).await.unwrap();
        let tomorrow: Day = "2026-10-17".parse().unwrap();
        assert!(client.list(&tomorrow).await.unwrap().is_empty());
        assert!(!client.remove(&tomorrow, UserId(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_order_text_is_rejected() {
        let (actor, client) = PartitionActor::new(10, Duration::from_secs(1));
        tokio::spawn(actor.run());

        let err = client.upsert(record(1, "  ", 0)).await.unwrap_err();
        assert_eq!(err, StoreError::EmptyOrderText);
    }
}
