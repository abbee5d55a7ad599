//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates optimal review intervals based on recall quality:
//! - Each word has an ease factor (EF) that adjusts based on performance
//! - Quality grades 0-2: Reset interval and repetitions (word needs relearning)
//! - Quality grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3
//! - Higher quality responses lead to longer intervals between reviews

use super::{ReviewState, Word};
use chrono::{DateTime, Duration, Utc};

/// Minimum ease factor allowed
const MIN_EASE_FACTOR: f64 = 1.3;

/// Calculates new review state according to the SM-2 algorithm.
/// quality: 0-5 (0 = complete blackout, 5 = perfect response);
/// out-of-range values are clamped to the nearest bound.
pub fn calculate_next_review(
    state: &ReviewState,
    quality: i32,
    now: DateTime<Utc>,
) -> ReviewState {
    let quality = quality.clamp(0, 5);

    let (interval_days, repetitions) = if quality < 3 {
        // Lapse: start over from a one-day interval
        (1, 0)
    } else {
        let new_reps = state.repetitions + 1;
        let new_interval = match new_reps {
            1 => 1,
            2 => 6,
            // Subsequent: multiply by the ease factor from before this review
            _ => (state.interval_days as f64 * state.ease_factor).round() as i32,
        };
        (new_interval, new_reps)
    };

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
    let q = quality as f64;
    let mut ease_factor = state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));

    // EF should not fall below 1.3
    if ease_factor < MIN_EASE_FACTOR {
        ease_factor = MIN_EASE_FACTOR;
    }

    ReviewState {
        ease_factor: (ease_factor * 100.0).round() / 100.0,
        interval_days,
        repetitions,
        next_review_date: now + Duration::days(interval_days as i64),
        last_reviewed: Some(now),
    }
}

/// A word is due once its scheduled review date has been reached.
pub fn is_due(state: &ReviewState, now: DateTime<Utc>) -> bool {
    state.next_review_date <= now
}

/// Orders words by review urgency, most urgent first.
///
/// Sorting by the signed offset (due date - now) puts overdue words
/// (negative offsets) ahead of upcoming ones, oldest due date first.
/// The sort is stable, so words with identical due dates keep their
/// input order.
pub fn rank_by_priority(mut words: Vec<Word>, now: DateTime<Utc>) -> Vec<Word> {
    words.sort_by_key(|w| w.review.next_review_date.signed_duration_since(now));
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WordEntry;

    fn state(ease_factor: f64, interval_days: i32, repetitions: i32) -> ReviewState {
        ReviewState {
            ease_factor,
            interval_days,
            repetitions,
            next_review_date: Utc::now(),
            last_reviewed: None,
        }
    }

    fn word_due_at(headword: &str, due: DateTime<Utc>) -> Word {
        let entry = WordEntry {
            headword: headword.to_string(),
            meaning: String::new(),
            ..Default::default()
        };
        let mut word = Word::from_entry(0, entry, due);
        word.review.next_review_date = due;
        word
    }

    #[test]
    fn test_first_review() {
        let next = calculate_next_review(&state(2.5, 1, 0), 5, Utc::now());

        assert_eq!(next.repetitions, 1);
        assert_eq!(next.interval_days, 1);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_second_review() {
        let next = calculate_next_review(&state(2.6, 1, 1), 5, Utc::now());

        assert_eq!(next.repetitions, 2);
        assert_eq!(next.interval_days, 6);
        assert!((next.ease_factor - 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_third_review_multiplies_by_prior_ease_factor() {
        let next = calculate_next_review(&state(2.7, 6, 2), 5, Utc::now());

        assert_eq!(next.repetitions, 3);
        // round(6 * 2.7), not the post-update EF
        assert_eq!(next.interval_days, 16);
    }

    #[test]
    fn test_lapse_resets_progress() {
        let next = calculate_next_review(&state(2.0, 20, 4), 1, Utc::now());

        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval_days, 1);
        // 2.0 + (0.1 - 4 * (0.08 + 4 * 0.02))
        assert!((next.ease_factor - 1.46).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_floor() {
        let next = calculate_next_review(&state(1.3, 1, 1), 0, Utc::now());
        assert!(next.ease_factor >= 1.3);

        // The floor holds for every quality grade
        for quality in 0..=5 {
            let next = calculate_next_review(&state(1.3, 1, 3), quality, Utc::now());
            assert!(next.ease_factor >= 1.3, "quality {} broke the floor", quality);
        }
    }

    #[test]
    fn test_quality_clamped_to_bounds() {
        let high = calculate_next_review(&state(2.5, 1, 0), 9, Utc::now());
        let five = calculate_next_review(&state(2.5, 1, 0), 5, Utc::now());
        assert_eq!(high.interval_days, five.interval_days);
        assert!((high.ease_factor - five.ease_factor).abs() < 1e-9);

        let low = calculate_next_review(&state(2.5, 10, 4), -3, Utc::now());
        let zero = calculate_next_review(&state(2.5, 10, 4), 0, Utc::now());
        assert_eq!(low.repetitions, 0);
        assert_eq!(low.interval_days, 1);
        assert!((low.ease_factor - zero.ease_factor).abs() < 1e-9);
    }

    #[test]
    fn test_next_review_date_is_last_reviewed_plus_interval() {
        let now = Utc::now();
        let next = calculate_next_review(&state(2.7, 6, 2), 4, now);

        assert_eq!(next.last_reviewed, Some(now));
        assert_eq!(
            next.next_review_date,
            now + Duration::days(next.interval_days as i64)
        );
    }

    #[test]
    fn test_intervals_grow_under_repeated_perfect_recall() {
        let now = Utc::now();
        let mut current = ReviewState::new(now);
        let mut intervals = Vec::new();

        for _ in 0..6 {
            current = calculate_next_review(&current, 5, now);
            intervals.push(current.interval_days);
        }

        assert_eq!(&intervals[..2], &[1, 6]);
        for pair in intervals.windows(2).skip(1) {
            assert!(pair[1] > pair[0], "intervals stopped growing: {:?}", intervals);
        }
    }

    #[test]
    fn test_is_due_at_exact_boundary() {
        let now = Utc::now();
        let mut review = ReviewState::new(now);

        review.next_review_date = now;
        assert!(is_due(&review, now));

        review.next_review_date = now + Duration::seconds(1);
        assert!(!is_due(&review, now));

        review.next_review_date = now - Duration::days(3);
        assert!(is_due(&review, now));
    }

    #[test]
    fn test_rank_by_priority_most_overdue_first() {
        let now = Utc::now();
        let words = vec![
            word_due_at("upcoming", now + Duration::days(3)),
            word_due_at("barely_overdue", now - Duration::days(1)),
            word_due_at("long_overdue", now - Duration::days(5)),
        ];

        let ranked = rank_by_priority(words, now);

        let order: Vec<&str> = ranked.iter().map(|w| w.headword.as_str()).collect();
        assert_eq!(order, ["long_overdue", "barely_overdue", "upcoming"]);
    }

    #[test]
    fn test_rank_by_priority_ties_keep_input_order() {
        let now = Utc::now();
        let due = now - Duration::days(2);
        let words = vec![
            word_due_at("first", due),
            word_due_at("second", due),
            word_due_at("third", due),
        ];

        let ranked = rank_by_priority(words, now);

        let order: Vec<&str> = ranked.iter().map(|w| w.headword.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }
}
