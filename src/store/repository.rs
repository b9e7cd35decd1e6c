//! Key/value persistence for editor snapshots.
//!
//! The engine never touches storage; the editor loads a [`Database`] through a [`Repository`],
//! hands it to the engine read-only, and saves it back after edits.

use std::{collections::HashMap, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    foundation::error::{PromptcastError, PromptcastResult},
    library::model::Database,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Well-known keys of persisted snapshots.
pub enum StorageKey {
    /// The scene [`Database`].
    Database,
    /// The legacy character/clothing/background library.
    LegacyLibrary,
}

impl StorageKey {
    /// Key string used by repositories.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "promptcast_db",
            Self::LegacyLibrary => "promptcast_legacy",
        }
    }
}

/// String values stored by key.
pub trait Repository {
    /// Stored value for `key`, or `None` if nothing was saved under it.
    fn load(&self, key: &str) -> PromptcastResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> PromptcastResult<()>;
}

#[derive(Clone, Debug, Default)]
/// In-process repository.
pub struct MemoryRepository {
    values: HashMap<String, String>,
}

impl MemoryRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn load(&self, key: &str) -> PromptcastResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> PromptcastResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Debug)]
/// Directory-backed repository: one `<key>.json` file per key.
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    /// Repository rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PromptcastResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(PromptcastError::validation(format!(
                "storage key {key:?} is not a plain file stem"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Repository for FsRepository {
    fn load(&self, key: &str) -> PromptcastResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PromptcastError::repository(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> PromptcastResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            PromptcastError::repository(format!("create dir '{}': {e}", self.root.display()))
        })?;
        std::fs::write(&path, value).map_err(|e| {
            PromptcastError::repository(format!("write '{}': {e}", path.display()))
        })
    }
}

/// Load and parse `key`, falling back to `fallback` when the value is missing or unreadable.
///
/// Repository read errors still propagate; only absent or malformed values fall back.
#[tracing::instrument(skip(repo, fallback))]
pub fn load_json_or<T, R>(repo: &R, key: StorageKey, fallback: T) -> PromptcastResult<T>
where
    T: DeserializeOwned,
    R: Repository + ?Sized,
{
    let Some(raw) = repo.load(key.as_str())? else {
        tracing::debug!(key = key.as_str(), "no stored value; using fallback");
        return Ok(fallback);
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "stored value unreadable; using fallback");
            Ok(fallback)
        }
    }
}

/// Serialize `value` as pretty JSON and store it under `key`.
pub fn save_json<T, R>(repo: &mut R, key: StorageKey, value: &T) -> PromptcastResult<()>
where
    T: Serialize + ?Sized,
    R: Repository + ?Sized,
{
    let raw = serde_json::to_string_pretty(value)?;
    repo.save(key.as_str(), &raw)
}

/// Full snapshot as pretty JSON.
pub fn export_database_json(db: &Database) -> PromptcastResult<String> {
    Ok(serde_json::to_string_pretty(db)?)
}

/// Parse a snapshot produced by [`export_database_json`] (or hand-written by the editor).
///
/// Sections missing from the document load empty; anything other than a JSON object is
/// rejected.
pub fn import_database_json(json: &str) -> PromptcastResult<Database> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(PromptcastError::serde(
            "database snapshot must be a JSON object",
        ));
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
#[path = "../../tests/unit/store/repository.rs"]
mod tests;
