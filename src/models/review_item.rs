//! Wrapper for words that tracks recall progress within a session.
use super::Word;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct ReviewItem {
    pub word: Word,
    pub is_recalled: bool,
    pub last_graded_at: Option<DateTime<Utc>>,
}

impl ReviewItem {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            is_recalled: false,
            last_graded_at: None,
        }
    }

    pub fn mark_as_recalled(&mut self, now: DateTime<Utc>) {
        self.is_recalled = true;
        self.last_graded_at = Some(now);
    }
}
