//! In-memory PreferenceStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::PreferenceStore;

/// In-memory implementation of PreferenceStore.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<HashMap<String, i64>>,
}

impl InMemoryPreferenceStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: impl Into<String>, value: i64) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value);
        Self {
            values: RwLock::new(values),
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>> {
        let values = self
            .values
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(values.get(key).copied())
    }

    fn set_int(&self, key: &str, value: i64) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        values.insert(key.to_owned(), value);
        Ok(())
    }
}
