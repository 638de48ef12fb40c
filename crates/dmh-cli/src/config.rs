use std::path::PathBuf;

use dmh_calendar::DateStore;
use dmh_encounter::EncounterStore;

/// Where the CLI keeps its state.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding both data files.
    pub data_dir: PathBuf,
    /// File name of the saved world date.
    pub date_file: String,
    /// File name of the saved encounters.
    pub encounters_file: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".dmh"),
            date_file: "world-date.json".to_string(),
            encounters_file: "encounters.json".to_string(),
        }
    }
}

impl CliConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Store for the current world date.
    pub fn date_store(&self) -> DateStore {
        DateStore::new(self.data_dir.join(&self.date_file))
    }

    /// Store for saved encounters.
    pub fn encounter_store(&self) -> EncounterStore {
        EncounterStore::new(self.data_dir.join(&self.encounters_file))
    }
}
