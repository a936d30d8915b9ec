//! Row models returned by the query layer

use serde::{Deserialize, Serialize};

/// Summed event counts for one date
///
/// Sums are NULL when every contributing row is NULL; see
/// [`crate::transform::cumulative_counts`] for the zero fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventCount {
    pub event_date: String,
    pub positive_events: Option<i64>,
    pub negative_events: Option<i64>,
}

/// Free-text note with its date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub note_date: String,
    pub note: String,
}

/// One classifier input row: total positive and negative events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ModelInput {
    pub positive_events: Option<i64>,
    pub negative_events: Option<i64>,
}

impl ModelInput {
    /// Column names the classifier was trained on, in order
    pub const FEATURES: [&'static str; 2] = ["positive_events", "negative_events"];

    /// Feature vector with NULL sums filled as zero
    pub fn features(&self) -> [f64; 2] {
        [
            self.positive_events.unwrap_or(0) as f64,
            self.negative_events.unwrap_or(0) as f64,
        ]
    }
}

/// Tabular result with column names taken from the statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
