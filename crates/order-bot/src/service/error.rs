//! Error types for the order service.

use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur while handling an order command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The submitted order text was empty or whitespace.
    #[error("Order text is empty")]
    EmptyOrder,

    /// The record store could not be reached. Not retried automatically.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The inbound event carried no acting user.
    #[error("Could not resolve the acting user")]
    UnresolvedIdentity,
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::StorageUnavailable(reason) => OrderError::StorageUnavailable(reason),
            StoreError::EmptyOrderText => OrderError::EmptyOrder,
        }
    }
}
