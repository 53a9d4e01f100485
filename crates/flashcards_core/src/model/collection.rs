//! In-memory flashcard collection.
//!
//! # Responsibility
//! - Hold the ordered groups and the active group selection.
//! - Enforce the mutation rules used by every UI entry point.
//!
//! # Invariants
//! - At least one group always exists; `Default` is recreated when needed.
//! - `current_index` is always a valid index into `groups`.
//! - Group name collisions are rejected only by `create_group` and
//!   `rename_current_group`; loaded data may still contain duplicates.

use crate::model::card::Card;
use crate::model::group::{normalize_group_name, Group};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Domain rule violations for collection mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Group name is blank after trim.
    InvalidGroupName,
    /// Another group already uses this name.
    DuplicateGroupName(String),
    /// Group index does not exist.
    GroupIndexOutOfRange { index: usize, len: usize },
    /// Card position does not exist in the active group.
    CardIndexOutOfRange { index: usize, len: usize },
    /// Front or back text is blank after trim.
    EmptyCardText,
    /// Active group has no cards to flip.
    NoCardsToFlip,
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGroupName => write!(f, "group name must not be blank"),
            Self::DuplicateGroupName(name) => write!(f, "group already exists: `{name}`"),
            Self::GroupIndexOutOfRange { index, len } => {
                write!(f, "group index {index} out of range for {len} group(s)")
            }
            Self::CardIndexOutOfRange { index, len } => {
                write!(f, "card index {index} out of range for {len} card(s)")
            }
            Self::EmptyCardText => write!(f, "card front and back must not be blank"),
            Self::NoCardsToFlip => write!(f, "no cards to flip in the current group"),
        }
    }
}

impl Error for CollectionError {}

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Ordered groups plus the active group selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    groups: Vec<Group>,
    current_index: usize,
}

impl Default for Collection {
    fn default() -> Self {
        Self::from_groups(Vec::new())
    }
}

impl Collection {
    /// Builds a collection from loaded groups.
    ///
    /// # Invariants
    /// - Empty input yields a single `Default` group.
    /// - Every card's flipped flag is reset.
    /// - The first group is selected.
    pub fn from_groups(mut groups: Vec<Group>) -> Self {
        for group in &mut groups {
            group.reset_flips();
        }
        if groups.is_empty() {
            groups.push(Group::default_group());
        }
        Self {
            groups,
            current_index: 0,
        }
    }

    /// Returns all groups in display order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns group names in display order.
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|group| group.name.clone()).collect()
    }

    /// Returns the active group index.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the active group.
    pub fn current_group(&self) -> &Group {
        &self.groups[self.current_index]
    }

    fn current_group_mut(&mut self) -> &mut Group {
        &mut self.groups[self.current_index]
    }

    /// Returns the active group's cards.
    pub fn current_cards(&self) -> &[Card] {
        &self.current_group().cards
    }

    /// Returns whether any group other than `except` already uses `name`.
    pub fn contains_group_name(&self, name: &str, except: Option<usize>) -> bool {
        self.groups
            .iter()
            .enumerate()
            .any(|(index, group)| Some(index) != except && group.name == name)
    }

    /// Switches the active group and resets its flipped flags.
    pub fn select_group(&mut self, index: usize) -> CollectionResult<()> {
        if index >= self.groups.len() {
            return Err(CollectionError::GroupIndexOutOfRange {
                index,
                len: self.groups.len(),
            });
        }
        self.current_index = index;
        self.current_group_mut().reset_flips();
        Ok(())
    }

    /// Appends a new empty group and selects it. Returns its index.
    pub fn create_group(&mut self, name: &str) -> CollectionResult<usize> {
        let name = normalize_group_name(name).ok_or(CollectionError::InvalidGroupName)?;
        if self.contains_group_name(&name, None) {
            return Err(CollectionError::DuplicateGroupName(name));
        }
        self.groups.push(Group::new(name));
        let index = self.groups.len() - 1;
        self.select_group(index)?;
        Ok(index)
    }

    /// Renames the active group.
    ///
    /// Returns `Ok(false)` when the trimmed name equals the current one.
    pub fn rename_current_group(&mut self, name: &str) -> CollectionResult<bool> {
        let name = normalize_group_name(name).ok_or(CollectionError::InvalidGroupName)?;
        if self.current_group().name == name {
            return Ok(false);
        }
        if self.contains_group_name(&name, Some(self.current_index)) {
            return Err(CollectionError::DuplicateGroupName(name));
        }
        self.current_group_mut().name = name;
        Ok(true)
    }

    /// Removes the active group and returns it.
    ///
    /// # Invariants
    /// - Removing the last group recreates `Default` at index 0.
    /// - The selection moves to the new last group when it fell off the end.
    pub fn delete_current_group(&mut self) -> Group {
        let removed = self.groups.remove(self.current_index);
        if self.groups.is_empty() {
            self.groups.push(Group::default_group());
            self.current_index = 0;
        } else if self.current_index >= self.groups.len() {
            self.current_index = self.groups.len() - 1;
        }
        self.current_group_mut().reset_flips();
        removed
    }

    /// Appends a card to the active group. Returns its position.
    pub fn add_card(&mut self, front: &str, back: &str) -> CollectionResult<usize> {
        let (front, back) = normalize_card_text(front, back)?;
        let cards = &mut self.current_group_mut().cards;
        cards.push(Card::new(front, back));
        Ok(cards.len() - 1)
    }

    /// Replaces both texts of one card in the active group.
    pub fn edit_card(&mut self, position: usize, front: &str, back: &str) -> CollectionResult<()> {
        self.ensure_card_position(position)?;
        let (front, back) = normalize_card_text(front, back)?;
        let card = &mut self.current_group_mut().cards[position];
        card.front = front;
        card.back = back;
        Ok(())
    }

    /// Flips one card in the active group. Returns the new flipped state.
    pub fn toggle_card(&mut self, position: usize) -> CollectionResult<bool> {
        self.ensure_card_position(position)?;
        Ok(self.current_group_mut().cards[position].toggle())
    }

    /// Toggles every card in the active group individually.
    pub fn flip_all(&mut self) -> CollectionResult<()> {
        let cards = &mut self.current_group_mut().cards;
        if cards.is_empty() {
            return Err(CollectionError::NoCardsToFlip);
        }
        for card in cards.iter_mut() {
            card.toggle();
        }
        Ok(())
    }

    /// Removes one card from the active group and returns it.
    pub fn remove_card(&mut self, position: usize) -> CollectionResult<Card> {
        self.ensure_card_position(position)?;
        Ok(self.current_group_mut().cards.remove(position))
    }

    /// Reinserts a card into `group_index` at `position`, clamped to the
    /// group length. Returns the effective position.
    pub fn insert_card(
        &mut self,
        group_index: usize,
        position: usize,
        card: Card,
    ) -> CollectionResult<usize> {
        let len = self.groups.len();
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or(CollectionError::GroupIndexOutOfRange {
                index: group_index,
                len,
            })?;
        let position = position.min(group.cards.len());
        group.cards.insert(position, card);
        Ok(position)
    }

    /// Replaces every group, as done by import.
    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        *self = Self::from_groups(groups);
    }

    fn ensure_card_position(&self, position: usize) -> CollectionResult<()> {
        let len = self.current_cards().len();
        if position >= len {
            return Err(CollectionError::CardIndexOutOfRange {
                index: position,
                len,
            });
        }
        Ok(())
    }
}

fn normalize_card_text(front: &str, back: &str) -> CollectionResult<(String, String)> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() || back.is_empty() {
        return Err(CollectionError::EmptyCardText);
    }
    Ok((front.to_string(), back.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Collection, CollectionError};
    use crate::model::card::Card;
    use crate::model::group::{Group, DEFAULT_GROUP_NAME};

    fn sample() -> Collection {
        let mut first = Group::new("Verbs");
        first.cards.push(Card::new("ir", "to go"));
        first.cards.push(Card::new("ser", "to be"));
        let second = Group::new("Nouns");
        Collection::from_groups(vec![first, second])
    }

    #[test]
    fn empty_input_creates_default_group() {
        let collection = Collection::from_groups(Vec::new());
        assert_eq!(collection.group_names(), vec![DEFAULT_GROUP_NAME.to_string()]);
        assert_eq!(collection.current_index(), 0);
    }

    #[test]
    fn from_groups_resets_flipped_flags() {
        let mut group = Group::new("g");
        let mut card = Card::new("a", "b");
        card.is_flipped = true;
        group.cards.push(card);

        let collection = Collection::from_groups(vec![group]);
        assert!(!collection.current_cards()[0].is_flipped);
    }

    #[test]
    fn create_group_rejects_duplicates_and_blank_names() {
        let mut collection = sample();
        assert_eq!(
            collection.create_group(" Verbs "),
            Err(CollectionError::DuplicateGroupName("Verbs".to_string()))
        );
        assert_eq!(
            collection.create_group("  "),
            Err(CollectionError::InvalidGroupName)
        );

        let index = collection.create_group(" Adjectives ").unwrap();
        assert_eq!(index, 2);
        assert_eq!(collection.current_index(), 2);
        assert_eq!(collection.current_group().name, "Adjectives");
    }

    #[test]
    fn rename_same_name_is_noop_and_collision_is_rejected() {
        let mut collection = sample();
        assert_eq!(collection.rename_current_group("Verbs"), Ok(false));
        assert_eq!(
            collection.rename_current_group("Nouns"),
            Err(CollectionError::DuplicateGroupName("Nouns".to_string()))
        );
        assert_eq!(collection.rename_current_group("Verbos"), Ok(true));
        assert_eq!(collection.current_group().name, "Verbos");
    }

    #[test]
    fn deleting_last_remaining_group_leaves_single_default() {
        let mut collection = Collection::from_groups(vec![Group::new("Only")]);
        let removed = collection.delete_current_group();
        assert_eq!(removed.name, "Only");
        assert_eq!(collection.groups().len(), 1);
        assert_eq!(collection.current_group().name, DEFAULT_GROUP_NAME);
        assert_eq!(collection.current_index(), 0);
    }

    #[test]
    fn deleting_trailing_group_clamps_selection() {
        let mut collection = sample();
        collection.select_group(1).unwrap();
        collection.delete_current_group();
        assert_eq!(collection.current_index(), 0);
        assert_eq!(collection.current_group().name, "Verbs");
    }

    #[test]
    fn select_group_resets_flips_and_checks_bounds() {
        let mut collection = sample();
        collection.flip_all().unwrap();
        collection.select_group(1).unwrap();
        collection.select_group(0).unwrap();
        assert!(collection.current_cards().iter().all(|card| !card.is_flipped));

        assert_eq!(
            collection.select_group(5),
            Err(CollectionError::GroupIndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn add_and_edit_card_trim_and_reject_blank_text() {
        let mut collection = sample();
        assert_eq!(
            collection.add_card("  ", "back"),
            Err(CollectionError::EmptyCardText)
        );
        let position = collection.add_card(" tener ", " to have ").unwrap();
        assert_eq!(position, 2);
        assert_eq!(collection.current_cards()[2], Card::new("tener", "to have"));

        collection.edit_card(0, "ir", "to go (v.)").unwrap();
        assert_eq!(collection.current_cards()[0].back, "to go (v.)");
        assert_eq!(
            collection.edit_card(9, "a", "b"),
            Err(CollectionError::CardIndexOutOfRange { index: 9, len: 3 })
        );
    }

    #[test]
    fn flip_all_toggles_each_card_individually() {
        let mut collection = sample();
        collection.toggle_card(0).unwrap();
        collection.flip_all().unwrap();
        let flags: Vec<bool> = collection
            .current_cards()
            .iter()
            .map(|card| card.is_flipped)
            .collect();
        assert_eq!(flags, vec![false, true]);

        collection.select_group(1).unwrap();
        assert_eq!(collection.flip_all(), Err(CollectionError::NoCardsToFlip));
    }

    #[test]
    fn insert_card_clamps_position() {
        let mut collection = sample();
        let position = collection
            .insert_card(0, 10, Card::new("x", "y"))
            .unwrap();
        assert_eq!(position, 2);
        assert!(collection.insert_card(7, 0, Card::new("x", "y")).is_err());
    }
}
