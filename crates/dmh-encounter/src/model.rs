//! Battle tracker data model, shaped after the external tracker's JSON format.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Version string the external battle tracker expects.
pub const BATTLE_TRACKER_VERSION: &str = "5.123.0";

/// An encounter: the creatures on the initiative list and round bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleTracker {
    /// Creatures in the encounter.
    pub creatures: Vec<Creature>,
    /// Next id to hand out. Always greater than every creature id.
    pub creature_id_count: i64,
    /// Current combat round.
    pub round: i64,
    /// Whether the tracker has started the battle.
    pub battle_created: bool,
    /// Sharing with players. Always `false` here.
    pub share_enabled: bool,
    /// Format version, always [`BATTLE_TRACKER_VERSION`].
    pub battle_tracker_version: String,
    /// Sharing timestamp. Always `None` here.
    pub shared_timestamp: Option<i64>,
    /// Whether the encounter came from a loaded file.
    pub loaded: bool,
}

impl Default for BattleTracker {
    fn default() -> Self {
        Self {
            creatures: Vec::new(),
            creature_id_count: 0,
            round: 0,
            battle_created: false,
            share_enabled: false,
            battle_tracker_version: BATTLE_TRACKER_VERSION.to_string(),
            shared_timestamp: None,
            loaded: false,
        }
    }
}

impl BattleTracker {
    /// Empty encounter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest creature id, or -1 when there are no creatures.
    pub fn max_creature_id(&self) -> i64 {
        self.creatures.iter().map(|c| c.id).max().unwrap_or(-1)
    }

    /// Look a creature up by id.
    pub fn creature(&self, id: i64) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Creatures sorted for play: highest initiative first, creatures
    /// without initiative last, ties broken by id.
    pub fn initiative_order(&self) -> Vec<&Creature> {
        let mut order: Vec<&Creature> = self.creatures.iter().collect();
        order.sort_by(|a, b| {
            b.initiative
                .is_some()
                .cmp(&a.initiative.is_some())
                .then(b.initiative.cmp(&a.initiative))
                .then(a.id.cmp(&b.id))
        });
        order
    }
}

/// Armour class as entered by the user: a number, or free text such as `"15 (shield)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArmorClass {
    /// Numeric AC.
    Number(serde_json::Number),
    /// Free-form AC. Empty when unknown.
    Text(String),
}

impl Default for ArmorClass {
    fn default() -> Self {
        ArmorClass::Text(String::new())
    }
}

impl fmt::Display for ArmorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArmorClass::Number(n) => write!(f, "{n}"),
            ArmorClass::Text(s) => f.write_str(s),
        }
    }
}

/// A creature on the initiative list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    /// Display name.
    pub name: String,
    /// Initiative, if rolled.
    pub initiative: Option<i64>,
    /// Current hit points.
    pub health_points: i64,
    /// Maximum hit points.
    pub max_health_points: i64,
    /// Armour class.
    pub armor_class: ArmorClass,
    /// Temporary hit points, if any.
    pub temporary_health_points: Option<i64>,
    /// Id unique within the encounter.
    pub id: i64,
    /// Whether the creature is still alive.
    pub alive: bool,
    /// Conditions applied to the creature.
    pub conditions: Vec<Condition>,
    /// Free-form notes.
    pub notes: Vec<Note>,
    /// Visible to players.
    pub shared: bool,
    /// Hit point bar visible to players.
    pub hit_points_shared: bool,
    /// Spell slots available per level. `None` for non-casters.
    pub total_spell_slots: Option<SpellSlots>,
    /// Spell slots spent per level. `None` for non-casters.
    pub used_spell_slots: Option<SpellSlots>,
    /// Limited-use spells keyed by a slug of their label.
    pub spells: BTreeMap<String, Spell>,
}

impl Creature {
    /// A fresh, living creature with the given id and name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initiative: None,
            health_points: 0,
            max_health_points: 0,
            armor_class: ArmorClass::default(),
            temporary_health_points: None,
            id,
            alive: true,
            conditions: Vec::new(),
            notes: Vec::new(),
            shared: true,
            hit_points_shared: true,
            total_spell_slots: None,
            used_spell_slots: None,
            spells: BTreeMap::new(),
        }
    }

    /// Name given to creatures that have none.
    pub fn default_name(id: i64) -> String {
        format!("Creature #{}", id.saturating_add(1))
    }
}

/// A note attached to a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note text.
    pub text: String,
    /// Round at which the note was added.
    pub applied_at_round: i64,
    /// Combat seconds at which the note was added.
    pub applied_at_seconds: i64,
    /// Id unique within the creature's notes.
    pub id: i64,
}

/// A condition (prone, poisoned, ...) attached to a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Condition name.
    pub text: String,
    /// Round at which it was applied.
    pub applied_at_round: i64,
    /// Combat seconds at which it was applied.
    pub applied_at_seconds: i64,
    /// Link to the rules text.
    pub url: String,
    /// Identifier.
    pub id: String,
}

/// A limited-use spell or ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Display label.
    pub label: String,
    /// Uses available, at least 1.
    pub total: i64,
}

/// Spell slot level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SpellLevel {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
    #[serde(rename = "5th")]
    Fifth,
    #[serde(rename = "6th")]
    Sixth,
    #[serde(rename = "7th")]
    Seventh,
    #[serde(rename = "8th")]
    Eighth,
    #[serde(rename = "9th")]
    Ninth,
}

impl SpellLevel {
    /// All levels, lowest first.
    pub const ALL: [SpellLevel; 9] = [
        SpellLevel::First,
        SpellLevel::Second,
        SpellLevel::Third,
        SpellLevel::Fourth,
        SpellLevel::Fifth,
        SpellLevel::Sixth,
        SpellLevel::Seventh,
        SpellLevel::Eighth,
        SpellLevel::Ninth,
    ];

    /// The key used in JSON (`"1st"` ... `"9th"`).
    pub fn key(self) -> &'static str {
        match self {
            SpellLevel::First => "1st",
            SpellLevel::Second => "2nd",
            SpellLevel::Third => "3rd",
            SpellLevel::Fourth => "4th",
            SpellLevel::Fifth => "5th",
            SpellLevel::Sixth => "6th",
            SpellLevel::Seventh => "7th",
            SpellLevel::Eighth => "8th",
            SpellLevel::Ninth => "9th",
        }
    }

    /// Level from its number (1..=9).
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

impl fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Slot counts per level. Levels without an entry have no slots configured.
pub type SpellSlots = BTreeMap<SpellLevel, i64>;
