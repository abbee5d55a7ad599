//! Review session management for spaced repetition practice.
//! Handles multi-round word review with SM-2 algorithm integration.

use super::{ReviewItem, Word, sm2};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Manages a review session with multiple rounds.
/// Words that aren't recalled (grade < 3) are repeated in subsequent rounds.
pub struct ReviewSession {
    pub all_items: Vec<ReviewItem>,
    pub current_round: Vec<usize>,
    pub current_index: usize,
    pub conn: Arc<Mutex<Connection>>,
    pub round_number: usize,
}

impl ReviewSession {
    /// Creates a new session from words that are due for review,
    /// in the order the caller supplies them (typically ranked by urgency).
    pub fn new_from_due_words(words: Vec<Word>, conn: Arc<Mutex<Connection>>) -> Self {
        let items: Vec<_> = words.into_iter().map(ReviewItem::new).collect();
        let indices: Vec<usize> = (0..items.len()).collect();

        Self {
            all_items: items,
            current_round: indices,
            current_index: 0,
            conn,
            round_number: 1,
        }
    }

    pub fn current_word(&self) -> Option<&ReviewItem> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.all_items.get(idx))
    }

    pub fn next_word(&mut self) {
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
        } else {
            // End of round - check if any words still need review
            self.start_next_round();
        }
    }

    /// Starts a new round with words that weren't recalled (grade < 3).
    /// If no words remain, the session is complete.
    fn start_next_round(&mut self) {
        let failed_indices: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| {
                self.all_items
                    .get(idx)
                    .map(|item| !item.is_recalled)
                    .unwrap_or(false)
            })
            .collect();

        if !failed_indices.is_empty() {
            self.current_round = failed_indices;
            self.current_index = 0;
            self.round_number += 1;

            // These words will be shown again, so clear their recall mark
            for &idx in &self.current_round {
                if let Some(item) = self.all_items.get_mut(idx) {
                    item.is_recalled = false;
                }
            }
        }
        // If failed_indices is empty, session ends (is_completed() = true)
    }

    /// Grades the current word and updates its review state using SM-2.
    ///
    /// The new state is written to the database first; memory is only
    /// updated once the write succeeds, so a failed write leaves the
    /// word unchanged and the review can be retried.
    pub fn grade_current_word(&mut self, quality: i32, now: DateTime<Utc>) -> rusqlite::Result<()> {
        if let Some(&actual_idx) = self.current_round.get(self.current_index) {
            if let Some(item) = self.all_items.get_mut(actual_idx) {
                let new_state = sm2::calculate_next_review(&item.word.review, quality, now);

                {
                    let conn = self.conn.lock().unwrap();
                    crate::database::db::update_review_state(&new_state, item.word.id, &conn)?;
                }

                item.word.review = new_state;

                // Recalled only if grade >= 3; failures repeat next round
                if quality >= 3 {
                    item.mark_as_recalled(now);
                } else {
                    item.is_recalled = false;
                }
            }
        }
        Ok(())
    }

    pub fn recalled_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| {
                self.all_items
                    .get(idx)
                    .map(|item| item.is_recalled)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.recalled_count()
    }

    /// Returns true when every word has been recalled or the round is empty.
    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty() || self.recalled_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} words", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} words to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db;
    use crate::models::WordEntry;

    fn session_with_words(headwords: &[&str]) -> ReviewSession {
        let conn = Connection::open_in_memory().unwrap();
        db::create_tables(&conn).unwrap();

        let now = Utc::now();
        for headword in headwords {
            let entry = WordEntry {
                headword: headword.to_string(),
                meaning: format!("meaning of {}", headword),
                ..Default::default()
            };
            db::add_word(&entry, now, &conn).unwrap();
        }

        let words = db::get_words_due_for_review(now, &conn).unwrap();
        ReviewSession::new_from_due_words(words, Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_session_completes_when_all_recalled() {
        let mut session = session_with_words(&["apple", "pear"]);
        let now = Utc::now();

        assert!(!session.is_completed());

        session.grade_current_word(4, now).unwrap();
        session.next_word();
        session.grade_current_word(5, now).unwrap();
        session.next_word();

        assert!(session.is_completed());
        assert_eq!(session.round_number, 1);
    }

    #[test]
    fn test_failed_words_repeat_in_next_round() {
        let mut session = session_with_words(&["apple", "pear"]);
        let now = Utc::now();

        session.grade_current_word(2, now).unwrap();
        session.next_word();
        session.grade_current_word(5, now).unwrap();
        session.next_word();

        // Second round holds only the failed word
        assert!(!session.is_completed());
        assert_eq!(session.round_number, 2);
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.current_word().unwrap().word.headword, "apple");

        session.grade_current_word(4, now).unwrap();
        session.next_word();
        assert!(session.is_completed());
    }

    #[test]
    fn test_grading_persists_new_review_state() {
        let mut session = session_with_words(&["apple"]);
        let now = Utc::now();

        session.grade_current_word(5, now).unwrap();

        let conn = session.conn.lock().unwrap();
        let words = db::get_all_words(&conn).unwrap();
        assert_eq!(words[0].review.repetitions, 1);
        assert_eq!(words[0].review.interval_days, 1);
        // Timestamps are persisted at second precision
        assert_eq!(
            words[0].review.last_reviewed.map(|t| t.timestamp()),
            Some(now.timestamp())
        );
    }

    #[test]
    fn test_empty_session_is_completed() {
        let session = session_with_words(&[]);
        assert!(session.is_completed());
        assert!(session.current_word().is_none());
    }
}
