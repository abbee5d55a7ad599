pub mod database;
pub mod export;
pub mod models;

pub use models::{ReviewItem, ReviewSession, ReviewState, Vocabulary, VocabularyStats, Word};
