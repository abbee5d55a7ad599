//! Database operations for the vocabulary trainer
//!
//! Handles SQLite database initialization, CRUD operations for words,
//! and SM-2 spaced repetition state management. Timestamps are stored
//! as unix seconds; callers pass the current time explicitly.

use crate::models::{ReviewState, Vocabulary, Word, WordEntry};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const WORD_SELECT: &str = "SELECT w.id, w.headword, w.meaning, w.synonyms, w.antonyms,
            w.usage_example, w.phonetic, w.audio_url, w.created_at,
            r.ease_factor, r.interval_days, r.repetitions, r.next_review_date, r.last_reviewed
     FROM words w
     JOIN review_state r ON w.id = r.word_id";

/// Opens the SQLite database at the given path and creates required tables.
pub fn init_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

/// Creates tables for words and their SM-2 review state.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS words (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            headword TEXT NOT NULL UNIQUE COLLATE NOCASE,
            meaning TEXT NOT NULL,
            synonyms TEXT NOT NULL DEFAULT '[]',
            antonyms TEXT NOT NULL DEFAULT '[]',
            usage_example TEXT,
            phonetic TEXT,
            audio_url TEXT,
            created_at INTEGER NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_state (
            word_id INTEGER PRIMARY KEY,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 1,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review_date INTEGER NOT NULL,
            last_reviewed INTEGER,
            FOREIGN KEY (word_id) REFERENCES words(id) ON DELETE CASCADE
        )",
        (),
    )?;

    Ok(())
}

fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

fn word_from_row(row: &Row) -> Result<Word> {
    let synonyms: String = row.get(3)?;
    let antonyms: String = row.get(4)?;

    Ok(Word {
        id: row.get(0)?,
        headword: row.get(1)?,
        meaning: row.get(2)?,
        synonyms: serde_json::from_str(&synonyms).unwrap_or_default(),
        antonyms: serde_json::from_str(&antonyms).unwrap_or_default(),
        usage_example: row.get(5)?,
        phonetic: row.get(6)?,
        audio_url: row.get(7)?,
        created_at: from_unix(row.get(8)?),
        review: ReviewState {
            ease_factor: row.get(9)?,
            interval_days: row.get(10)?,
            repetitions: row.get(11)?,
            next_review_date: from_unix(row.get(12)?),
            last_reviewed: row.get::<_, Option<i64>>(13)?.map(from_unix),
        },
    })
}

/// Checks whether a headword is already stored (case-insensitive).
pub fn word_exists(headword: &str, conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM words WHERE headword = ?1 COLLATE NOCASE",
        params![headword],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Adds a word with its enrichment data and initializes its SM-2 review state.
///
/// Returns the new word ID. A freshly added word is due immediately.
/// Both rows are inserted in one transaction: a word without review
/// state never becomes visible.
pub fn add_word(entry: &WordEntry, now: DateTime<Utc>, conn: &Connection) -> Result<i64> {
    let synonyms = serde_json::to_string(&entry.synonyms).unwrap_or_else(|_| "[]".to_string());
    let antonyms = serde_json::to_string(&entry.antonyms).unwrap_or_else(|_| "[]".to_string());

    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO words (headword, meaning, synonyms, antonyms, usage_example, phonetic, audio_url, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.headword,
            entry.meaning,
            synonyms,
            antonyms,
            entry.usage_example,
            entry.phonetic,
            entry.audio_url,
            now.timestamp(),
        ],
    )?;

    let word_id = tx.last_insert_rowid();

    tx.execute(
        "INSERT INTO review_state (word_id, ease_factor, interval_days, repetitions, next_review_date, last_reviewed)
         VALUES (?1, 2.5, 1, 0, ?2, NULL)",
        params![word_id, now.timestamp()],
    )?;

    tx.commit()?;
    Ok(word_id)
}

/// Retrieves all words with their review state, newest first.
pub fn get_all_words(conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY w.created_at DESC, w.id DESC", WORD_SELECT))?;
    let words = stmt
        .query_map([], word_from_row)?
        .collect::<Result<Vec<Word>>>()?;
    Ok(words)
}

/// Searches words by headword or meaning (case-insensitive substring match).
/// LIKE wildcards in the query are matched literally.
pub fn search_words(query: &str, conn: &Connection) -> Result<Vec<Word>> {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("%{}%", escaped);
    let mut stmt = conn.prepare(&format!(
        "{} WHERE w.headword LIKE ?1 ESCAPE '\\' OR w.meaning LIKE ?1 ESCAPE '\\'
         ORDER BY w.created_at DESC, w.id DESC",
        WORD_SELECT
    ))?;
    let words = stmt
        .query_map(params![pattern], word_from_row)?
        .collect::<Result<Vec<Word>>>()?;
    Ok(words)
}

/// Retrieves a single word by ID, or None if it doesn't exist.
pub fn get_word(id: i64, conn: &Connection) -> Result<Option<Word>> {
    conn.query_row(
        &format!("{} WHERE w.id = ?1", WORD_SELECT),
        params![id],
        word_from_row,
    )
    .optional()
}

/// Retrieves words due for review at the given moment.
///
/// Returns words where next_review_date <= now,
/// ordered by next_review_date (oldest first).
pub fn get_words_due_for_review(now: DateTime<Utc>, conn: &Connection) -> Result<Vec<Word>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE r.next_review_date <= ?1 ORDER BY r.next_review_date ASC, w.id ASC",
        WORD_SELECT
    ))?;
    let words = stmt
        .query_map(params![now.timestamp()], word_from_row)?
        .collect::<Result<Vec<Word>>>()?;
    Ok(words)
}

/// Writes a word's SM-2 review state after a review.
///
/// All five fields are written in one statement so a word's state is
/// never half-updated.
pub fn update_review_state(state: &ReviewState, word_id: i64, conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE review_state
         SET ease_factor = ?1, interval_days = ?2, repetitions = ?3,
             next_review_date = ?4, last_reviewed = ?5
         WHERE word_id = ?6",
        params![
            state.ease_factor,
            state.interval_days,
            state.repetitions,
            state.next_review_date.timestamp(),
            state.last_reviewed.map(|t| t.timestamp()),
            word_id,
        ],
    )?;

    Ok(())
}

/// Deletes a word and its review state.
pub fn delete_word(id: i64, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM review_state WHERE word_id = ?1", params![id])?;
    conn.execute("DELETE FROM words WHERE id = ?1", params![id])?;
    Ok(())
}

/// Loads the whole word collection as a named vocabulary, for export.
pub fn load_vocabulary(name: &str, conn: &Connection) -> Result<Vocabulary> {
    Ok(Vocabulary {
        name: name.to_string(),
        words: get_all_words(conn)?,
    })
}
