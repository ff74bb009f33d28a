use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::{AdventError, AdventResult};

/// In-process store, used by tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AdventResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| AdventError::Storage("memory store poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> AdventResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| AdventError::Storage("memory store poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
