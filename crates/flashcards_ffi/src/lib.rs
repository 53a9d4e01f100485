//! Flutter bridge crate for the flashcards core.

pub mod api;
