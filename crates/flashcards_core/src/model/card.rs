//! Card domain model.
//!
//! # Responsibility
//! - Define the front/back text pair shown in a group list.
//! - Own the display-only flipped state.
//!
//! # Invariants
//! - `is_flipped` is transient: it is written to disk but reset on load.
//! - Cards created through the collection have non-blank trimmed text.

use serde::{Deserialize, Serialize};

/// One flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Prompt side, shown while not flipped.
    pub front: String,
    /// Answer side, shown while flipped.
    pub back: String,
    /// Serialized as `isFlipped` to match the persisted file shape.
    #[serde(rename = "isFlipped", default)]
    pub is_flipped: bool,
}

impl Card {
    /// Creates an unflipped card.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            is_flipped: false,
        }
    }

    /// Toggles the flipped state and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_flipped = !self.is_flipped;
        self.is_flipped
    }

    /// Returns the text for the side currently facing up.
    pub fn visible_text(&self) -> &str {
        if self.is_flipped {
            &self.back
        } else {
            &self.front
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Card;

    #[test]
    fn toggle_switches_visible_side() {
        let mut card = Card::new("front", "back");
        assert_eq!(card.visible_text(), "front");
        assert!(card.toggle());
        assert_eq!(card.visible_text(), "back");
        assert!(!card.toggle());
    }

    #[test]
    fn missing_flipped_field_defaults_to_false() {
        let card: Card = serde_json::from_str(r#"{"front":"a","back":"b"}"#).unwrap();
        assert!(!card.is_flipped);
    }
}
