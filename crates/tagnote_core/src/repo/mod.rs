//! Collection repositories over the key-value store.
//!
//! # Responsibility
//! - Define load/save contracts for the note store and tag registry.
//! - Isolate storage key layout from service orchestration.
//!
//! # Invariants
//! - Saves replace a whole collection; there are no partial writes.
//! - Loads never fail on absent or malformed data (default to empty).

use crate::kv::KvError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection load/save.
#[derive(Debug)]
pub enum RepoError {
    Kv(KvError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}
