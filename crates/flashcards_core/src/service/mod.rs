//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection mutations and repository flushes.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod collection_service;
pub mod preview;
