//! Title + tag filtering over composed note views.
//!
//! # Invariants
//! - Result is an order-preserving subsequence of the input.
//! - Selected tags combine with AND: a note must carry every one.
//! - Empty query and empty selection each match everything.

use crate::model::note::Note;
use crate::model::tag::Tag;

/// Filter criteria entered on the note list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against titles.
    pub title_query: String,
    /// Tags every matching note must carry, compared by ID.
    pub selected_tags: Vec<Tag>,
}

impl NoteFilter {
    pub fn new(title_query: impl Into<String>, selected_tags: Vec<Tag>) -> Self {
        Self {
            title_query: title_query.into(),
            selected_tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title_query.is_empty() && self.selected_tags.is_empty()
    }

    pub fn apply(&self, notes: &[Note]) -> Vec<Note> {
        filter_notes(notes, &self.title_query, &self.selected_tags)
    }
}

/// Returns the notes passing both the title and the tag predicate.
pub fn filter_notes(notes: &[Note], title_query: &str, selected_tags: &[Tag]) -> Vec<Note> {
    let needle = title_query.to_lowercase();
    notes
        .iter()
        .filter(|note| title_matches(note, &needle) && carries_all(note, selected_tags))
        .cloned()
        .collect()
}

fn title_matches(note: &Note, lowered_query: &str) -> bool {
    lowered_query.is_empty() || note.title.to_lowercase().contains(lowered_query)
}

fn carries_all(note: &Note, selected_tags: &[Tag]) -> bool {
    selected_tags.iter().all(|tag| note.has_tag(&tag.id))
}
