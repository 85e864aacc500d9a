use chrono::NaiveDateTime;
use order_store::Day;

/// Returned by `place_order` so the caller can render a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub day: Day,
    pub display_name: String,
    pub order_text: String,
}

/// Whether `reset_order` found something to remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    Removed,
    NothingToRemove,
}

impl From<bool> for ResetOutcome {
    fn from(removed: bool) -> Self {
        if removed {
            Self::Removed
        } else {
            Self::NothingToRemove
        }
    }
}

/// One line of a day summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub display_name: String,
    pub order_text: String,
    pub written_at: NaiveDateTime,
}

/// Snapshot of a day's orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// Nobody has ordered on `day`.
    NoOrders { day: Day },
    /// Entries sorted by write time, earliest first.
    Orders { day: Day, entries: Vec<SummaryEntry> },
}

impl Summary {
    pub fn day(&self) -> Day {
        match self {
            Self::NoOrders { day } | Self::Orders { day, .. } => *day,
        }
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        match self {
            Self::NoOrders { .. } => &[],
            Self::Orders { entries, .. } => entries,
        }
    }
}
