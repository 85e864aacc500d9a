//! # System Lifecycle
//!
//! Wiring lives here; the pieces themselves stay ignorant of each other.
//!
//! [`OrderSystem::start`] reads the storage section of
//! [`BotConfig`](crate::config::BotConfig) and builds one of:
//!
//! - **redis**: a [`RedisStore`](order_store::RedisStore), checked with `PING`
//!   before the bot accepts commands.
//! - **memory**: a [`PartitionActor`](order_store::PartitionActor) spawned on
//!   its own task, reached through a cloned
//!   [`StoreClient`](order_store::StoreClient).
//!
//! Either store is put behind an [`OrderService`](crate::service::OrderService)
//! and a [`CommandHandler`](crate::commands::CommandHandler).
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the handler** - the last `StoreClient` goes with it and the
//!    actor's channel closes
//! 2. **Actor drains** - `receiver.recv()` returns `None` after the queued
//!    requests are answered
//! 3. **Await the task** - a panicked actor surfaces as an error
//!
//! The Redis backend has no background task; dropping the handler releases
//! the connection manager.

pub mod order_system;
pub mod tracing;

pub use self::order_system::*;
pub use self::tracing::*;
