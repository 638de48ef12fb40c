//! Encounters for the Dungeon Master helper.
//!
//! An encounter is a [`BattleTracker`]: the creatures on the initiative list
//! with their hit points, conditions, notes and spell slots. The JSON shape
//! matches an external battle tracker so encounters can be moved between
//! the two. Imports from that tracker (or from hand-edited files) are
//! normalized field by field in [`io`] rather than trusted.

/// Editing operations on an encounter.
pub mod builder;
/// Error types for the encounter crate.
pub mod error;
pub mod io;
pub mod model;
pub mod store;

/// Re-export editing inputs.
pub use builder::{CreatureDraft, SlotKind};
/// Re-export error types.
pub use error::{EncounterError, EncounterResult};
/// Re-export import/export entry points.
pub use io::{ImportOutcome, export_json, export_value, import_json, import_value};
/// Re-export model types.
pub use model::{
    ArmorClass, BATTLE_TRACKER_VERSION, BattleTracker, Condition, Creature, Note, Spell,
    SpellLevel, SpellSlots,
};
/// Re-export the saved-encounter store.
pub use store::{EncounterPatch, EncounterStore, SavedEncounter};
