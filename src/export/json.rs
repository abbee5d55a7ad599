//! JSON import/export module for vocabularies.
//! Provides functionality to save and load Vocabulary structures to/from JSON files.

use crate::models::Vocabulary;
use std::fs::File;
use std::io::{Read, Write};

/// Exports a vocabulary to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(
    vocabulary: &Vocabulary,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_string = serde_json::to_string_pretty(vocabulary)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a vocabulary from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<Vocabulary, Box<dyn std::error::Error>> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let vocabulary: Vocabulary = serde_json::from_str(&contents)?;

    println!("Vocabulary '{}' imported from '{}'", vocabulary.name, filename);
    Ok(vocabulary)
}
