//! Domain model for tagged notes.
//!
//! # Responsibility
//! - Define the persisted record shapes (`Tag`, `RawNote`).
//! - Define the derived view shape (`Note`) and edit input (`NoteData`).
//!
//! # Invariants
//! - Notes reference tags by ID only; the tag registry owns labels.
//! - `Note` is derived at read time and never persisted.

pub mod note;
pub mod tag;
