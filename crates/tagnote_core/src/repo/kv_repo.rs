//! Note/tag repository contracts and key-value implementation.
//!
//! # Responsibility
//! - Map the note store to key `Notes` and the tag registry to key `Tags`.
//! - Keep JSON layout compatible with browser-exported state.
//!
//! # Invariants
//! - Collection order is preserved across save/load.
//! - No schema version field is written.

use crate::kv::{load_json_or_default, store_json, KeyValueStore};
use crate::model::note::RawNote;
use crate::model::tag::Tag;
use crate::repo::RepoResult;
use log::debug;

/// Storage key of the raw note collection.
pub const NOTES_KEY: &str = "Notes";
/// Storage key of the tag registry.
pub const TAGS_KEY: &str = "Tags";

/// Persistence contract for the note store.
pub trait NoteRepository {
    /// Loads every raw note in stored order.
    fn load_notes(&self) -> RepoResult<Vec<RawNote>>;
    /// Replaces the stored note collection.
    fn save_notes(&mut self, notes: &[RawNote]) -> RepoResult<()>;
}

/// Persistence contract for the tag registry.
pub trait TagRepository {
    /// Loads every tag in registry order.
    fn load_tags(&self) -> RepoResult<Vec<Tag>>;
    /// Replaces the stored tag registry.
    fn save_tags(&mut self, tags: &[Tag]) -> RepoResult<()>;
}

/// Repository storing both collections in one key-value store.
pub struct KvRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> NoteRepository for KvRepository<S> {
    fn load_notes(&self) -> RepoResult<Vec<RawNote>> {
        let notes: Vec<RawNote> = load_json_or_default(&self.store, NOTES_KEY)?;
        debug!(
            "event=notes_load module=repo status=ok count={}",
            notes.len()
        );
        Ok(notes)
    }

    fn save_notes(&mut self, notes: &[RawNote]) -> RepoResult<()> {
        store_json(&mut self.store, NOTES_KEY, notes)?;
        debug!(
            "event=notes_save module=repo status=ok count={}",
            notes.len()
        );
        Ok(())
    }
}

impl<S: KeyValueStore> TagRepository for KvRepository<S> {
    fn load_tags(&self) -> RepoResult<Vec<Tag>> {
        let tags: Vec<Tag> = load_json_or_default(&self.store, TAGS_KEY)?;
        debug!("event=tags_load module=repo status=ok count={}", tags.len());
        Ok(tags)
    }

    fn save_tags(&mut self, tags: &[Tag]) -> RepoResult<()> {
        store_json(&mut self.store, TAGS_KEY, tags)?;
        debug!("event=tags_save module=repo status=ok count={}", tags.len());
        Ok(())
    }
}
