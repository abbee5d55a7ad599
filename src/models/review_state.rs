//! Spaced repetition state carried by every word.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub interval_days: i32,
    pub repetitions: i32,
    pub next_review_date: DateTime<Utc>,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// State for a freshly added word: due immediately, never reviewed.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease_factor: 2.5,
            interval_days: 1,
            repetitions: 0,
            next_review_date: now,
            last_reviewed: None,
        }
    }
}
