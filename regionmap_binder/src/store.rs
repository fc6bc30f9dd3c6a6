// Copyright 2025 the Regionmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence of the last selection.
//!
//! A [`SelectionStore`] is a small key/value store of JSON values. The map
//! keeps exactly one entry, [`SELECTION_KEY`], holding the full [`Region`]
//! record of the last selection, or `null` once cleared.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regionmap_catalog::Region;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Key under which the selected region is persisted.
pub const SELECTION_KEY: &str = "mapaColombia:seleccion";

/// Key/value storage of JSON values.
pub trait SelectionStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value) -> StoreResult<()>;

    /// The persisted selection, if one was saved and not cleared since.
    fn load_selection(&self) -> StoreResult<Option<Region>> {
        match self.get(SELECTION_KEY)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    /// Persist `region` as the selection, or `null` for none.
    fn save_selection(&mut self, region: Option<&Region>) -> StoreResult<()> {
        let value = match region {
            Some(region) => serde_json::to_value(region)?,
            None => Value::Null,
        };
        self.set(SELECTION_KEY, value)
    }
}

impl<S: SelectionStore + ?Sized> SelectionStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Volatile store, for tests and hosts without persistence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// A JSON object on disk, one member per key.
///
/// A missing file reads as empty and is created on the first write.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> StoreResult<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject(self.path.clone())),
        }
    }
}

impl SelectionStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_object()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        let mut object = self.read_object()?;
        object.insert(key.to_owned(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&Value::Object(object))?)?;
        debug!(path = %self.path.display(), key, "store written");
        Ok(())
    }
}
