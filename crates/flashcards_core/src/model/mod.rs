//! Flashcard domain model.
//!
//! # Responsibility
//! - Define the card/group records shared by persistence and services.
//! - Own the collection mutation rules and selection invariants.
//!
//! # Invariants
//! - A collection always holds at least one group.
//! - The flipped flag is display state and never survives a reload.

pub mod card;
pub mod collection;
pub mod group;
