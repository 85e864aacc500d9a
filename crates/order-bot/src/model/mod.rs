//! Plain data types exchanged between the transport, the command layer and
//! the [`OrderService`](crate::service::OrderService).

pub mod actor;
pub mod command;
pub mod summary;

pub use actor::*;
pub use command::*;
pub use summary::*;
