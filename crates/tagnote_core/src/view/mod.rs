//! Derived read models for display surfaces.
//!
//! # Responsibility
//! - Join raw notes with the tag registry into `Note` views.
//! - Apply title/tag filtering over composed views.
//!
//! # Invariants
//! - Everything here is pure; inputs are never mutated.

pub mod compose;
pub mod filter;
