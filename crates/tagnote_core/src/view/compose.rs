//! View composition: raw notes x tag registry -> note views.

use crate::model::note::{Note, RawNote};
use crate::model::tag::Tag;

/// Resolves every raw note's tag IDs against `tags`.
///
/// Output is 1:1 with `notes` and in the same order. Each view's `tags` is
/// the subsequence of `tags` whose ID the note references, so display order
/// follows the registry rather than `tag_ids`. References to tags missing
/// from the registry are dropped.
pub fn compose_views(notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    notes.iter().map(|note| compose_view(note, tags)).collect()
}

/// Resolves one raw note; see [`compose_views`].
pub fn compose_view(note: &RawNote, tags: &[Tag]) -> Note {
    Note {
        id: note.id.clone(),
        title: note.title.clone(),
        markdown: note.markdown.clone(),
        tags: tags
            .iter()
            .filter(|tag| note.has_tag(&tag.id))
            .cloned()
            .collect(),
    }
}
