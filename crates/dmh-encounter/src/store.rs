//! Saved encounters, kept as a single JSON array on disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{EncounterError, EncounterResult};
use crate::model::BattleTracker;

/// Title used when an encounter is saved without one.
pub const UNTITLED: &str = "Untitled Encounter";

/// An encounter saved by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEncounter {
    /// Random UUID.
    pub id: String,
    /// User-facing title.
    pub title: String,
    /// Creation time, Unix milliseconds.
    pub created_at: i64,
    /// Last modification time, Unix milliseconds.
    pub updated_at: i64,
    /// The encounter itself.
    pub data: BattleTracker,
}

/// Fields to change in [`EncounterStore::update`].
#[derive(Debug, Clone, Default)]
pub struct EncounterPatch {
    /// New title.
    pub title: Option<String>,
    /// New encounter data.
    pub data: Option<BattleTracker>,
}

/// File-backed list of saved encounters, most recently created first.
#[derive(Debug, Clone)]
pub struct EncounterStore {
    path: PathBuf,
}

impl EncounterStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved encounters. A missing or unreadable file reads as empty;
    /// individual malformed entries are skipped here but kept on disk.
    pub fn list(&self) -> Vec<SavedEncounter> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "cannot read encounters");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(saved) => Some(saved),
                Err(e) => {
                    warn!(error = %e, "skipping malformed saved encounter");
                    None
                }
            })
            .collect()
    }

    /// Look a saved encounter up by id.
    pub fn get(&self, id: &str) -> Option<SavedEncounter> {
        self.list().into_iter().find(|e| e.id == id)
    }

    /// Replace the entry with the same id, or insert it at the front.
    /// Entries that do not parse as encounters are written back unchanged.
    pub fn upsert(&self, encounter: SavedEncounter) -> EncounterResult<()> {
        let mut entries = self.read_entries()?;
        let position = entries
            .iter()
            .position(|e| entry_id(e) == Some(encounter.id.as_str()));
        let value = serde_json::to_value(encounter)?;
        match position {
            Some(idx) => entries[idx] = value,
            None => entries.insert(0, value),
        }
        self.write_entries(&entries)
    }

    /// Save a new encounter under a fresh id.
    pub fn create(&self, title: &str, data: BattleTracker) -> EncounterResult<SavedEncounter> {
        let now = Utc::now().timestamp_millis();
        let title = title.trim();
        let saved = SavedEncounter {
            id: Uuid::new_v4().to_string(),
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            created_at: now,
            updated_at: now,
            data,
        };
        self.upsert(saved.clone())?;
        debug!(id = %saved.id, title = %saved.title, "encounter created");
        Ok(saved)
    }

    /// Change the title and/or data of a saved encounter, bumping `updated_at`.
    pub fn update(&self, id: &str, patch: EncounterPatch) -> EncounterResult<SavedEncounter> {
        let mut saved = self
            .get(id)
            .ok_or_else(|| EncounterError::EncounterNotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            saved.title = title;
        }
        if let Some(data) = patch.data {
            saved.data = data;
        }
        saved.updated_at = Utc::now().timestamp_millis().max(saved.created_at);
        self.upsert(saved.clone())?;
        Ok(saved)
    }

    /// Delete a saved encounter. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> EncounterResult<bool> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|e| entry_id(e) != Some(id));
        if entries.len() == before {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        debug!(id, "encounter deleted");
        Ok(true)
    }

    /// Save a copy of an encounter with `" (copy)"` appended to its title.
    pub fn duplicate(&self, id: &str) -> EncounterResult<SavedEncounter> {
        let source = self
            .get(id)
            .ok_or_else(|| EncounterError::EncounterNotFound(id.to_string()))?;
        self.create(&format!("{} (copy)", source.title), source.data)
    }

    /// Raw entries on disk. A missing file is empty; a file that is not a
    /// JSON list is an error so writers never replace it.
    fn read_entries(&self) -> EncounterResult<Vec<Value>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => Ok(entries),
            _ => Err(EncounterError::CorruptStore(self.path.display().to_string())),
        }
    }

    fn write_entries(&self, entries: &[Value]) -> EncounterResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}
