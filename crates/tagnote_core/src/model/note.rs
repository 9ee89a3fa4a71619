//! Note records: persisted form, view form and edit input.
//!
//! # Responsibility
//! - `RawNote` is what the `Notes` key stores.
//! - `Note` is what list/detail displays consume.
//! - `NoteData` is what create/update callers submit.
//!
//! # Invariants
//! - `RawNote::tag_ids` holds no duplicate IDs.
//! - `RawNote::tag_ids` may transiently reference tags that no longer exist;
//!   view composition drops such references.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier.
pub type NoteId = String;

/// Persisted note record referencing tags by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    /// Unordered membership set, stored as a JSON array.
    #[serde(default)]
    pub tag_ids: Vec<TagId>,
}

impl RawNote {
    /// Builds a raw note from edit input under the given ID.
    pub fn from_data(id: impl Into<NoteId>, data: &NoteData) -> Self {
        Self {
            id: id.into(),
            title: data.title.clone(),
            markdown: data.markdown.clone(),
            tag_ids: data.tag_ids(),
        }
    }

    /// Builds a raw note from edit input with a freshly generated ID.
    pub fn create(data: &NoteData) -> Self {
        Self::from_data(Uuid::new_v4().to_string(), data)
    }

    /// Replaces title, markdown and tag membership, keeping the ID.
    pub fn apply(&mut self, data: &NoteData) {
        self.title = data.title.clone();
        self.markdown = data.markdown.clone();
        self.tag_ids = data.tag_ids();
    }

    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }

    /// Removes `tag_id` from the membership set.
    ///
    /// Returns whether anything was removed.
    pub fn retract_tag(&mut self, tag_id: &str) -> bool {
        let before = self.tag_ids.len();
        self.tag_ids.retain(|id| id != tag_id);
        self.tag_ids.len() != before
    }
}

/// Note payload submitted by create/edit surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            tags,
        }
    }

    /// Selected tag IDs in first-seen order, duplicates dropped.
    pub fn tag_ids(&self) -> Vec<TagId> {
        let mut ids: Vec<TagId> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            if !ids.contains(&tag.id) {
                ids.push(tag.id.clone());
            }
        }
        ids
    }
}

/// Note view with tag IDs resolved against the tag registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub markdown: String,
    /// Resolved tags in registry order.
    pub tags: Vec<Tag>,
}

impl Note {
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|tag| tag.id == tag_id)
    }
}
