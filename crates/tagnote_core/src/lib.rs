//! Core data layer for tagNote: tag registry, note store and derived views.
//! This crate is the single source of truth for note/tag invariants.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use kv::{KeyValueStore, KvError, KvResult, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteData, NoteId, RawNote};
pub use model::tag::{Tag, TagId};
pub use repo::kv_repo::{KvRepository, NoteRepository, TagRepository, NOTES_KEY, TAGS_KEY};
pub use repo::{RepoError, RepoResult};
pub use service::notebook_service::{NotebookError, NotebookResult, NotebookService};
pub use view::compose::compose_views;
pub use view::filter::{filter_notes, NoteFilter};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
