//! Entity store: CRUD over an injected key-value persistence collaborator.
//!
//! Each collection is one JSON array under one storage key. Every
//! mutation reads the whole collection, applies an in-memory transform,
//! and writes the whole collection back. The store does not serialize
//! concurrent writers; the embedding shell drives one mutation at a time
//! from its single UI thread (known limitation, see DESIGN.md).

mod logs;
mod medications;
mod pets;
mod settings;
mod tasks;

pub use settings::*;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{CareTask, DoseLog, Medication, Pet};

pub(crate) const PETS_KEY: &str = "care_pets";
pub(crate) const MEDICATIONS_KEY: &str = "care_medications";
pub(crate) const TASKS_KEY: &str = "care_tasks";
pub(crate) const LOGS_KEY: &str = "care_logs";
pub(crate) const SETTINGS_KEY: &str = "care_settings";

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence collaborator: a schemaless key-value blob store.
/// Absence of a key means an empty collection; there is no migration
/// support.
pub trait Storage {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
    fn multi_remove(&mut self, keys: &[String]) -> StoreResult<()>;
}

/// In-memory storage backend (for tests and previews).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn multi_remove(&mut self, keys: &[String]) -> StoreResult<()> {
        for key in keys {
            self.entries.remove(key);
        }
        Ok(())
    }
}

/// Immutable view of all four collections, taken at one point in time.
/// The derive/view functions consume this instead of reaching into the
/// store, so they stay pure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub pets: Vec<Pet>,
    pub medications: Vec<Medication>,
    pub tasks: Vec<CareTask>,
    pub logs: Vec<DoseLog>,
}

/// Canonical owner of the entity collections.
pub struct EntityStore<S: Storage> {
    storage: S,
    namespace: Option<String>,
}

impl<S: Storage> EntityStore<S> {
    /// Wrap a storage backend with no key namespace.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            namespace: None,
        }
    }

    /// Namespace all collection keys by an opaque user key, so multiple
    /// households on one device do not share data.
    pub fn set_namespace(&mut self, namespace: Option<String>) {
        self.namespace = namespace;
    }

    pub(crate) fn scoped(&self, key: &str) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{key}"),
            None => key.to_string(),
        }
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub(crate) fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        match self.storage.get(&self.scoped(key))? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) fn save<T: Serialize>(&mut self, key: &str, items: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(items)?;
        self.storage.set(&self.scoped(key), &raw)
    }

    /// Load all four collections at once.
    pub fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(Snapshot {
            pets: self.pets()?,
            medications: self.medications()?,
            tasks: self.tasks()?,
            logs: self.logs()?,
        })
    }

    /// Remove every collection owned by the current namespace, settings
    /// included. Used when a household is removed from the device.
    pub fn wipe(&mut self) -> StoreResult<()> {
        let keys: Vec<String> = [PETS_KEY, MEDICATIONS_KEY, TASKS_KEY, LOGS_KEY, SETTINGS_KEY]
            .iter()
            .map(|key| self.scoped(key))
            .collect();
        self.storage.multi_remove(&keys)
    }
}

pub(crate) fn require_name(value: &str, what: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_quantity(value: Option<f64>, what: &str) -> StoreResult<()> {
    if let Some(quantity) = value {
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(StoreError::Validation(format!(
                "{what} must be a non-negative number, got {quantity}"
            )));
        }
    }
    Ok(())
}
