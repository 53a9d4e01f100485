//! CLI smoke and inspection entry point.
//!
//! # Responsibility
//! - Verify `flashcards_core` linkage without the Flutter runtime.
//! - Summarize a collection file: one line per group.

use flashcards_core::store::read_groups;
use flashcards_core::{derive_card_preview, Collection};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("flashcards_core ping={}", flashcards_core::ping());
    println!("flashcards_core version={}", flashcards_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let groups = match read_groups(&path) {
        Ok(groups) => groups,
        Err(err) => {
            eprintln!("failed to load `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let collection = Collection::from_groups(groups);
    for (index, group) in collection.groups().iter().enumerate() {
        let first = group
            .cards
            .first()
            .map(|card| derive_card_preview(&card.front))
            .unwrap_or_default();
        println!(
            "group[{index}] name={:?} cards={} first={:?}",
            group.name,
            group.cards.len(),
            first
        );
    }
    ExitCode::SUCCESS
}
