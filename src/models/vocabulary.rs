//! Vocabulary is a named collection of words
use super::Word;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub words: Vec<Word>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            name: "My Vocabulary".to_string(),
            words: Vec::new(),
        }
    }
}
