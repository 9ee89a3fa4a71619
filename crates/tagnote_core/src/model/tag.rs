//! Tag registry record.
//!
//! # Invariants
//! - `id` is opaque and never reused for another tag.
//! - `label` is user-visible, mutable and not a uniqueness key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque tag identifier.
///
/// Generated IDs are UUID v4 strings, but IDs loaded from storage are
/// accepted verbatim.
pub type TagId = String;

/// Named label, many-to-many associable with notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
}

impl Tag {
    /// Creates a tag with a freshly generated ID.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), label)
    }

    /// Creates a tag with a caller-provided ID.
    ///
    /// Used when the ID already exists (storage, import, selection input).
    pub fn with_id(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
