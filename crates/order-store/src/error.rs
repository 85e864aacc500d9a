//! # Store Errors
//!
//! The error type shared by every [`RecordStore`](crate::RecordStore) backend.
//! Backends translate their own failures (closed channels, timeouts, Redis
//! errors) into these variants so callers never see backend details.

/// Errors that can occur while reading or writing order records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing storage could not be reached or did not answer in time.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    /// An upsert carried an order text that is empty after trimming.
    #[error("Order text must not be empty")]
    EmptyOrderText,
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable(reason.into())
    }
}
