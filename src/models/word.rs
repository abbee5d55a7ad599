//! Word is a vocabulary entry with its meaning, enrichment data and review state.
use super::ReviewState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub headword: String,
    pub meaning: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub usage_example: Option<String>,
    pub phonetic: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub review: ReviewState,
}

/// Word data before it is stored: the headword plus enrichment fields
/// (meaning, synonyms, pronunciation) supplied by the caller.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WordEntry {
    pub headword: String,
    pub meaning: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub usage_example: Option<String>,
    pub phonetic: Option<String>,
    pub audio_url: Option<String>,
}

impl Word {
    /// Builds a full word record from an entry, with default review state.
    pub fn from_entry(id: i64, entry: WordEntry, now: DateTime<Utc>) -> Self {
        Self {
            id,
            headword: entry.headword,
            meaning: entry.meaning,
            synonyms: entry.synonyms,
            antonyms: entry.antonyms,
            usage_example: entry.usage_example,
            phonetic: entry.phonetic,
            audio_url: entry.audio_url,
            created_at: now,
            review: ReviewState::new(now),
        }
    }
}
