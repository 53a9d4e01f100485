//! Group domain model.
//!
//! # Responsibility
//! - Define a named, ordered list of cards.
//! - Normalize user-entered group names.
//!
//! # Invariants
//! - Group names are stored trimmed and non-blank when created through the
//!   collection API.
//! - Card order is insertion order; the file preserves it verbatim.

use crate::model::card::Card;
use serde::{Deserialize, Serialize};

/// Name of the group created whenever the collection would become empty.
pub const DEFAULT_GROUP_NAME: &str = "Default";

/// Named card list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Display name, unique among groups by convention.
    pub name: String,
    /// Ordered cards. Missing in older files, so it defaults to empty.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    /// Creates the fallback `Default` group.
    pub fn default_group() -> Self {
        Self::new(DEFAULT_GROUP_NAME)
    }

    /// Clears the flipped flag of every card.
    pub fn reset_flips(&mut self) {
        for card in &mut self.cards {
            card.is_flipped = false;
        }
    }
}

/// Normalizes one group name. Returns `None` for blank input.
pub fn normalize_group_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_group_name, Group};
    use crate::model::card::Card;

    #[test]
    fn normalize_group_name_trims_and_rejects_blank() {
        assert_eq!(normalize_group_name("  Verbs "), Some("Verbs".to_string()));
        assert_eq!(normalize_group_name("   "), None);
    }

    #[test]
    fn reset_flips_clears_every_card() {
        let mut group = Group::new("g");
        group.cards.push(Card::new("a", "b"));
        group.cards.push(Card::new("c", "d"));
        group.cards.iter_mut().for_each(|card| card.is_flipped = true);

        group.reset_flips();
        assert!(group.cards.iter().all(|card| !card.is_flipped));
    }
}
