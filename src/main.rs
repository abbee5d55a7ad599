use vocab_app::*;

use chrono::Utc;
use database::db;
use models::{WordEntry, sm2, stats};
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

fn main() {
    let conn = db::init_database("vocab.sqlite3").expect("Failed to initialize database");
    let now = Utc::now();

    if db::get_all_words(&conn).unwrap_or_default().is_empty() {
        seed_sample_words(&conn);
        println!("Sample vocabulary created!");
    }

    let words = db::get_all_words(&conn).expect("Failed to load vocabulary");
    let stats = stats::vocabulary_stats(&words, now);
    println!(
        "{} words total, {} due for review, {} never reviewed",
        stats.total, stats.due_for_review, stats.not_reviewed
    );

    let due = db::get_words_due_for_review(now, &conn).expect("Failed to query due words");
    if due.is_empty() {
        println!("Nothing to review right now.");
        return;
    }

    // Most urgent first
    let ranked = sm2::rank_by_priority(due, now);

    let conn = Arc::new(Mutex::new(conn));
    let mut session = ReviewSession::new_from_due_words(ranked, conn);
    let stdin = io::stdin();
    run_session(&mut session, &mut stdin.lock());
}

fn seed_sample_words(conn: &rusqlite::Connection) {
    let now = Utc::now();
    let samples = [
        WordEntry {
            headword: "serendipity".to_string(),
            meaning: "finding something good without looking for it".to_string(),
            synonyms: vec!["luck".to_string(), "fluke".to_string()],
            usage_example: Some("Meeting her was pure serendipity.".to_string()),
            ..Default::default()
        },
        WordEntry {
            headword: "ephemeral".to_string(),
            meaning: "lasting for a very short time".to_string(),
            synonyms: vec!["fleeting".to_string(), "transient".to_string()],
            antonyms: vec!["permanent".to_string()],
            ..Default::default()
        },
        WordEntry {
            headword: "meticulous".to_string(),
            meaning: "showing great attention to detail".to_string(),
            synonyms: vec!["careful".to_string(), "thorough".to_string()],
            antonyms: vec!["careless".to_string()],
            ..Default::default()
        },
    ];

    for entry in &samples {
        let _ = db::add_word(entry, now, conn);
    }
}

fn run_session(session: &mut ReviewSession, input: &mut impl BufRead) {
    let mut last_round = 0;

    while !session.is_completed() {
        if session.round_number != last_round {
            last_round = session.round_number;
            println!("\n{}", session.phase_message());
        }

        let (headword, phonetic, meaning, example) = match session.current_word() {
            Some(item) => (
                item.word.headword.clone(),
                item.word.phonetic.clone(),
                item.word.meaning.clone(),
                item.word.usage_example.clone(),
            ),
            None => break,
        };

        match phonetic {
            Some(phonetic) => println!("\n  {} {}", headword, phonetic),
            None => println!("\n  {}", headword),
        }
        prompt("Press Enter to reveal the meaning...", input);

        println!("  {}", meaning);
        if let Some(example) = example {
            println!("  e.g. {}", example);
        }

        // Closed input ends the session without grading; the word stays
        // due and will come back next time.
        let quality = match read_quality(input) {
            Some(quality) => quality,
            None => {
                println!("\nInput closed; ending session early.");
                return;
            }
        };
        if let Err(err) = session.grade_current_word(quality, Utc::now()) {
            eprintln!("Failed to record review: {}", err);
        }
        session.next_word();
    }

    println!("\nSession complete!");
}

fn prompt(message: &str, input: &mut impl BufRead) {
    print!("{}", message);
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = input.read_line(&mut line);
}

/// Reads a recall grade, re-prompting until it's a number 0-5.
/// Returns None once the input is exhausted.
fn read_quality(input: &mut impl BufRead) -> Option<i32> {
    loop {
        print!("Grade your recall (0 = blackout, 5 = perfect): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if input.read_line(&mut line).unwrap_or(0) == 0 {
            return None;
        }

        match line.trim().parse::<i32>() {
            Ok(quality) if (0..=5).contains(&quality) => return Some(quality),
            _ => println!("Please enter a number between 0 and 5."),
        }
    }
}
