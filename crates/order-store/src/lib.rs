//! # Order Store
//!
//! Day-partitioned storage for daily food orders: every user holds at most one
//! [`OrderRecord`] per [`Day`], and writing again replaces it.
//!
//! ## Layers
//!
//! 1. **Model** ([`record`]) - [`Day`], [`UserId`], [`OrderRecord`].
//! 2. **Contract** ([`RecordStore`]) - `upsert`, `remove`, `list`, all async and
//!    object safe so callers can hold an `Arc<dyn RecordStore>`.
//! 3. **Backends**
//!    - [`PartitionActor`] + [`StoreClient`]: in-process actor; one task owns
//!      every partition and handles requests sequentially.
//!    - [`RedisStore`]: one Redis hash per day, durable across restarts.
//!    - [`mock::MockStore`]: scripted answers for tests.
//!
//! ## Consistency
//!
//! Writes to the same `(day, user_id)` are linearizable in every backend: the
//! actor serializes its mailbox and Redis applies `HSET`/`HDEL` atomically per
//! field. A concurrent `list` may or may not observe an in-flight write.
//!
//! ## Failure Model
//!
//! Every backend reports unreachable storage, closed channels and expired
//! timeouts as [`StoreError::StorageUnavailable`]. Nothing is retried here.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod redis_store;
pub mod store;

pub use actor::PartitionActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::{Day, InvalidDay, OrderRecord, UserId};
pub use redis_store::{RedisSettings, RedisStore};
pub use store::RecordStore;
