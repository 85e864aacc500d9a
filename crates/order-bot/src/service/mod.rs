//! # Order Service
//!
//! Bridges an inbound command (acting user + argument text) and the
//! [`RecordStore`]. The service keeps no state of its own between calls: it
//! resolves the display name, derives "today" from its [`Clock`], and lets
//! the store enforce one record per user per day.
//!
//! ## Usage
//!
//! ```rust
//! use order_bot::model::{Actor, Summary};
//! use order_bot::service::{OrderService, SystemClock};
//! use order_store::PartitionActor;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, store) = PartitionActor::new(32, Duration::from_secs(2));
//!     tokio::spawn(actor.run());
//!
//!     let service = OrderService::new(Arc::new(store), Arc::new(SystemClock));
//!     let alice = Actor::new(1).with_handle("alice");
//!
//!     let confirmation = service.place_order(&alice, "Pizza").await?;
//!     assert_eq!(confirmation.display_name, "@alice");
//!
//!     let summary = service.summarize_today().await?;
//!     assert_eq!(summary.entries().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod error;

pub use clock::*;
pub use error::*;

use crate::model::{Actor, OrderConfirmation, ResetOutcome, Summary, SummaryEntry};
use order_store::{Day, OrderRecord, RecordStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Orchestrates order placement, reset and summaries over a [`RecordStore`].
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The current day according to the service clock.
    pub fn today(&self) -> Day {
        Day::of(self.clock.now())
    }

    /// Stores `order_text` as the actor's order for today, replacing any
    /// earlier order from the same user.
    ///
    /// # Errors
    ///
    /// [`OrderError::EmptyOrder`] when the text is blank,
    /// [`OrderError::StorageUnavailable`] when the store fails.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn place_order(
        &self,
        actor: &Actor,
        order_text: &str,
    ) -> Result<OrderConfirmation, OrderError> {
        let order_text = order_text.trim();
        if order_text.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let written_at = self.clock.now();
        let record = OrderRecord {
            day: Day::of(written_at),
            user_id: actor.id,
            display_name: actor.display_name(),
            order_text: order_text.to_string(),
            written_at,
        };
        debug!(?record, "place_order called");

        let confirmation = OrderConfirmation {
            day: record.day,
            display_name: record.display_name.clone(),
            order_text: record.order_text.clone(),
        };
        self.store.upsert(record).await?;

        info!(day = %confirmation.day, display_name = %confirmation.display_name, "Order placed");
        Ok(confirmation)
    }

    /// Removes the actor's order for today, if there is one.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn reset_order(&self, actor: &Actor) -> Result<ResetOutcome, OrderError> {
        let day = self.today();
        let outcome = ResetOutcome::from(self.store.remove(&day, actor.id).await?);
        info!(%day, ?outcome, "Order reset");
        Ok(outcome)
    }

    /// Today's orders, earliest first.
    pub async fn summarize_today(&self) -> Result<Summary, OrderError> {
        self.summarize(self.today()).await
    }

    /// The orders for `day`, earliest first.
    ///
    /// Storage order carries no meaning, so entries are sorted by `written_at`;
    /// equal timestamps fall back to the user id to keep output stable.
    #[instrument(skip(self))]
    pub async fn summarize(&self, day: Day) -> Result<Summary, OrderError> {
        let mut records = self.store.list(&day).await?;
        if records.is_empty() {
            debug!("No orders");
            return Ok(Summary::NoOrders { day });
        }

        records.sort_by_key(|r| (r.written_at, r.user_id));
        let entries: Vec<SummaryEntry> = records
            .into_iter()
            .map(|r| SummaryEntry {
                display_name: r.display_name,
                order_text: r.order_text,
                written_at: r.written_at,
            })
            .collect();
        debug!(count = entries.len(), "Summarized");
        Ok(Summary::Orders { day, entries })
    }
}
