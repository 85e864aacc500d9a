//! # Food Order Bot
//!
//! Collects one food order per user per day from chat commands and prints a
//! time-ordered summary on request. Storage lives in the [`order_store`]
//! crate; this crate owns everything between an inbound message and the
//! reply text.
//!
//! ## Core Components
//!
//! - **[model]**: inbound events, parsed [`Command`](model::Command)s, and the
//!   values the service hands back.
//! - **[service]**: [`OrderService`](service::OrderService), the only code
//!   that talks to a [`RecordStore`](order_store::RecordStore).
//! - **[commands]**: [`CommandHandler`](commands::CommandHandler), one reply per
//!   recognized command.
//! - **[config]**: [`BotConfig`](config::BotConfig) from environment variables.
//! - **[lifecycle]**: store selection, wiring, shutdown and tracing setup.
//! - **[console]**: stdin/stdout transport used by the binary.

pub mod commands;
pub mod config;
pub mod console;
pub mod lifecycle;
pub mod model;
pub mod service;
