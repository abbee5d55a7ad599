//! Aggregate statistics over a vocabulary.
use super::{Word, sm2};
use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyStats {
    pub total: usize,
    pub due_for_review: usize,
    pub reviewed: usize,
    pub not_reviewed: usize,
}

/// Counts total, due and reviewed words at the given moment.
pub fn vocabulary_stats(words: &[Word], now: DateTime<Utc>) -> VocabularyStats {
    let due_for_review = words
        .iter()
        .filter(|w| sm2::is_due(&w.review, now))
        .count();
    let reviewed = words
        .iter()
        .filter(|w| w.review.last_reviewed.is_some())
        .count();

    VocabularyStats {
        total: words.len(),
        due_for_review,
        reviewed,
        not_reviewed: words.len() - reviewed,
    }
}
