//! # Order Records
//!
//! The data model shared by every store backend: the [`Day`] partition key, the
//! [`UserId`] dedup key, and the [`OrderRecord`] value that lives under both.

use crate::error::StoreError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Calendar date identifying a day partition.
///
/// Renders and parses strictly as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day(NaiveDate);

impl Day {
    /// The day a wall-clock timestamp falls on.
    pub fn of(timestamp: NaiveDateTime) -> Self {
        Self(timestamp.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

/// Error returned when a string is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day '{0}', expected YYYY-MM-DD")]
pub struct InvalidDay(pub String);

impl FromStr for Day {
    type Err = InvalidDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date =
            NaiveDate::parse_from_str(s, DAY_FORMAT).map_err(|_| InvalidDay(s.to_string()))?;
        // chrono accepts "2024-1-5" and five-digit years; the partition key must not.
        if date.format(DAY_FORMAT).to_string() != s {
            return Err(InvalidDay(s.to_string()));
        }
        Ok(Self(date))
    }
}

/// Stable identifier of a chat user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// One user's latest order for one day.
///
/// The display name is resolved when the record is written and never
/// refreshed, so a summary shows what the user was called at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub day: Day,
    pub user_id: UserId,
    pub display_name: String,
    pub order_text: String,
    pub written_at: NaiveDateTime,
}

impl OrderRecord {
    /// Checks the constraints every backend enforces before accepting a write.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.order_text.trim().is_empty() {
            return Err(StoreError::EmptyOrderText);
        }
        Ok(())
    }
}
