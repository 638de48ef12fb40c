//! Persistence of the current world date as a small JSON file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::date::{EPOCH_DATE, WorldDate};
use crate::error::CalendarResult;
use crate::season::Season;

/// Rebuild a date from an untrusted persisted blob.
///
/// `year` must be an integer, `season` one of the four literals, and
/// `day`/`hour`/`minute` integers within their ranges. Anything else yields
/// [`EPOCH_DATE`].
pub fn date_from_value(value: &Value) -> WorldDate {
    match parse_date(value) {
        Some(date) => date,
        None => {
            warn!(blob = %value, "persisted date rejected, falling back to epoch");
            EPOCH_DATE
        }
    }
}

fn parse_date(value: &Value) -> Option<WorldDate> {
    let obj = value.as_object()?;

    let year = obj.get("year")?.as_i64()?;
    let season: Season = serde_json::from_value(obj.get("season")?.clone()).ok()?;
    let day = field_u32(obj.get("day")?)?;
    let hour = field_u32(obj.get("hour")?)?;
    let minute = field_u32(obj.get("minute")?)?;

    WorldDate::new(year, season, day, hour, minute).validated().ok()
}

fn field_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// File-backed store for the current world date.
#[derive(Debug, Clone)]
pub struct DateStore {
    path: PathBuf,
}

impl DateStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved date. Never fails: a missing, unreadable or malformed
    /// file yields [`EPOCH_DATE`].
    pub fn load(&self) -> WorldDate {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved date, starting at epoch");
                return EPOCH_DATE;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read saved date");
                return EPOCH_DATE;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => date_from_value(&value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "saved date is not JSON");
                EPOCH_DATE
            }
        }
    }

    /// Persist `date`, creating parent directories as needed.
    pub fn save(&self, date: &WorldDate) -> CalendarResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(date)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), %date, "date saved");
        Ok(())
    }
}
