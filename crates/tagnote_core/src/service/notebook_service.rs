//! Notebook use-case service: tag registry + note store.
//!
//! # Responsibility
//! - Own the in-memory tag registry and note store for one session.
//! - Apply CRUD mutations with synchronous write-through persistence.
//! - Serve composed and filtered note views after every mutation.
//!
//! # Invariants
//! - Both collections are read once, on `open`.
//! - A mutation persists before the in-memory copy is replaced; a failed
//!   write leaves that collection untouched.
//! - `delete_tag` commits per collection: when the Notes write succeeds and
//!   the Tags write fails, the retracted notes stay committed (matching
//!   storage) while the tag remains in the registry.
//! - Update/delete of an unknown ID is a silent no-op returning `Ok(false)`.
//! - `delete_tag` retracts the tag ID from every note before removing the
//!   tag from the registry.

use crate::model::note::{Note, NoteData, NoteId, RawNote};
use crate::model::tag::{Tag, TagId};
use crate::repo::kv_repo::{NoteRepository, TagRepository};
use crate::repo::RepoError;
use crate::view::compose::{compose_view, compose_views};
use crate::view::filter::NoteFilter;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for notebook use-cases.
#[derive(Debug)]
pub enum NotebookError {
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NotebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NotebookError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type NotebookResult<T> = Result<T, NotebookError>;

/// Notebook facade over a repository holding both collections.
pub struct NotebookService<R: NoteRepository + TagRepository> {
    repo: R,
    notes: Vec<RawNote>,
    tags: Vec<Tag>,
}

impl<R: NoteRepository + TagRepository> NotebookService<R> {
    /// Loads both collections from `repo`.
    ///
    /// Absent or malformed stored collections start empty.
    pub fn open(repo: R) -> NotebookResult<Self> {
        let tags = repo.load_tags()?;
        let notes = repo.load_notes()?;
        info!(
            "event=notebook_open module=service status=ok notes={} tags={}",
            notes.len(),
            tags.len()
        );
        Ok(Self { repo, notes, tags })
    }

    /// Tag registry in insertion order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Persisted note records in insertion order.
    pub fn raw_notes(&self) -> &[RawNote] {
        &self.notes
    }

    pub fn find_tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == tag_id)
    }

    /// All notes with tags resolved against the current registry.
    pub fn notes(&self) -> Vec<Note> {
        compose_views(&self.notes, &self.tags)
    }

    /// One note view by ID, or `None` when no such note exists.
    pub fn note(&self, note_id: &str) -> Option<Note> {
        self.notes
            .iter()
            .find(|note| note.id == note_id)
            .map(|note| compose_view(note, &self.tags))
    }

    /// Composed views passing `filter`, in store order.
    pub fn filter_notes(&self, filter: &NoteFilter) -> Vec<Note> {
        filter.apply(&self.notes())
    }

    /// Appends a new tag with a generated ID and returns it.
    ///
    /// Labels are not deduplicated.
    pub fn add_tag(&mut self, label: impl Into<String>) -> NotebookResult<Tag> {
        let tag = Tag::new(label);
        let mut next = self.tags.clone();
        next.push(tag.clone());
        self.commit_tags(next)?;
        info!(
            "event=tag_add module=service status=ok tag_id={} tags={}",
            tag.id,
            self.tags.len()
        );
        Ok(tag)
    }

    /// Replaces the label of `tag_id`, keeping its ID and position.
    ///
    /// Returns `Ok(false)` when the tag does not exist.
    pub fn update_tag_label(
        &mut self,
        tag_id: &str,
        label: impl Into<String>,
    ) -> NotebookResult<bool> {
        let Some(index) = self.tags.iter().position(|tag| tag.id == tag_id) else {
            skip_not_found("tag_update", "tag_id", tag_id);
            return Ok(false);
        };

        let mut next = self.tags.clone();
        next[index].label = label.into();
        self.commit_tags(next)?;
        info!("event=tag_update module=service status=ok tag_id={tag_id}");
        Ok(true)
    }

    /// Removes `tag_id` from the registry and from every note referencing it.
    ///
    /// Notes are written before the registry, so an interrupted delete can
    /// leave an unused tag but never a dangling reference. On a failed
    /// registry write the error is returned with the note retraction already
    /// applied in memory and in storage.
    /// Returns `Ok(false)` when the tag does not exist.
    pub fn delete_tag(&mut self, tag_id: &str) -> NotebookResult<bool> {
        let Some(index) = self.tags.iter().position(|tag| tag.id == tag_id) else {
            skip_not_found("tag_delete", "tag_id", tag_id);
            return Ok(false);
        };

        let mut next_notes = self.notes.clone();
        let mut retracted = 0usize;
        for note in &mut next_notes {
            if note.retract_tag(tag_id) {
                retracted += 1;
            }
        }
        if retracted > 0 {
            self.commit_notes(next_notes)?;
        }

        let mut next_tags = self.tags.clone();
        next_tags.remove(index);
        self.commit_tags(next_tags)?;
        info!(
            "event=tag_delete module=service status=ok tag_id={tag_id} notes_retracted={retracted}"
        );
        Ok(true)
    }

    /// Appends a note built from `data` and returns its generated ID.
    pub fn create_note(&mut self, data: &NoteData) -> NotebookResult<NoteId> {
        let note = RawNote::create(data);
        let note_id = note.id.clone();
        let mut next = self.notes.clone();
        next.push(note);
        self.commit_notes(next)?;
        info!(
            "event=note_create module=service status=ok note_id={note_id} tag_count={}",
            data.tags.len()
        );
        Ok(note_id)
    }

    /// Replaces title, markdown and tags of `note_id`.
    ///
    /// Returns `Ok(false)` when the note does not exist.
    pub fn update_note(&mut self, note_id: &str, data: &NoteData) -> NotebookResult<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == note_id) else {
            skip_not_found("note_update", "note_id", note_id);
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next[index].apply(data);
        self.commit_notes(next)?;
        info!("event=note_update module=service status=ok note_id={note_id}");
        Ok(true)
    }

    /// Removes `note_id` from the store.
    ///
    /// Returns `Ok(false)` when the note does not exist.
    pub fn delete_note(&mut self, note_id: &str) -> NotebookResult<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == note_id) else {
            skip_not_found("note_delete", "note_id", note_id);
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit_notes(next)?;
        info!("event=note_delete module=service status=ok note_id={note_id}");
        Ok(true)
    }

    /// Resolves tag IDs to registry entries, preserving input order.
    ///
    /// Returns the IDs that have no registry entry as the error value.
    pub fn resolve_tags(&self, tag_ids: &[TagId]) -> Result<Vec<Tag>, Vec<TagId>> {
        let mut resolved = Vec::with_capacity(tag_ids.len());
        let mut missing = Vec::new();
        for tag_id in tag_ids {
            match self.find_tag(tag_id) {
                Some(tag) => resolved.push(tag.clone()),
                None => missing.push(tag_id.clone()),
            }
        }
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(missing)
        }
    }

    /// Returns the repository, dropping in-memory state.
    pub fn into_repo(self) -> R {
        self.repo
    }

    fn commit_notes(&mut self, next: Vec<RawNote>) -> NotebookResult<()> {
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(())
    }

    fn commit_tags(&mut self, next: Vec<Tag>) -> NotebookResult<()> {
        self.repo.save_tags(&next)?;
        self.tags = next;
        Ok(())
    }
}

fn skip_not_found(event: &str, id_field: &str, id: &str) {
    debug!("event={event} module=service status=skipped reason=not_found {id_field}={id}");
}
