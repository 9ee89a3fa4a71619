//! Durable key-value store holding JSON-serialized collections.
//!
//! # Responsibility
//! - Define the get/set-by-key contract the rest of core persists through.
//! - Own JSON (de)serialization and the default-on-missing/malformed policy.
//!
//! # Invariants
//! - An absent key reads as the collection default (first run).
//! - A malformed stored value reads as the default and is logged, never
//!   propagated as an error.
//! - Keys must be non-blank.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Key-value layer error.
#[derive(Debug)]
pub enum KvError {
    /// Storage backend failure.
    Db(DbError),
    /// Value could not be serialized to JSON.
    Serialize {
        key: String,
        source: serde_json::Error,
    },
    /// Blank key supplied by caller.
    EmptyKey,
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "failed to serialize value for key `{key}`: {source}")
            }
            Self::EmptyKey => write!(f, "key-value store key cannot be empty"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize { source, .. } => Some(source),
            Self::EmptyKey => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string-to-string mapping.
///
/// Values are opaque to implementations; JSON handling lives in
/// [`load_json_or_default`] and [`store_json`].
pub trait KeyValueStore {
    /// Reads the raw value stored under `key`.
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str) -> KvResult<()>;
}

/// Reads and deserializes the value under `key`.
///
/// Returns `T::default()` when the key is absent or the stored JSON does not
/// parse as `T`.
///
/// # Errors
/// - Returns an error only when the backend read itself fails.
pub fn load_json_or_default<T, S>(store: &S, key: &str) -> KvResult<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(
                "event=kv_load module=kv status=fallback key={key} reason=malformed_json line={} column={}",
                err.line(),
                err.column()
            );
            Ok(T::default())
        }
    }
}

/// Serializes `value` as JSON and writes it under `key`.
pub fn store_json<T, S>(store: &mut S, key: &str, value: &T) -> KvResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| KvError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

pub(crate) fn ensure_key(key: &str) -> KvResult<()> {
    if key.trim().is_empty() {
        return Err(KvError::EmptyKey);
    }
    Ok(())
}
