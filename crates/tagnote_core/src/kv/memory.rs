//! In-process key-value backend.

use super::{ensure_key, KeyValueStore, KvResult};
use std::collections::BTreeMap;

/// Non-durable store; contents vanish with the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        ensure_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        ensure_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        ensure_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
