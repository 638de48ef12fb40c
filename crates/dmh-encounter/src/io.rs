//! Import and export of encounters in the external battle tracker format.
//!
//! Imports accept arbitrary JSON. Only the top-level shape is required (an
//! object with a `creatures` array); every other field is coerced or
//! replaced by a default, so a hand-edited or older file still loads.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{EncounterError, EncounterResult};
use crate::model::{
    ArmorClass, BATTLE_TRACKER_VERSION, BattleTracker, Condition, Creature, Note, Spell,
    SpellLevel, SpellSlots,
};

/// A normalized encounter plus anything worth telling the user about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// The rebuilt encounter.
    pub encounter: BattleTracker,
    /// Non-fatal findings, e.g. a version mismatch.
    pub warnings: Vec<String>,
}

/// Parse and normalize an encounter from JSON text.
pub fn import_json(text: &str) -> EncounterResult<ImportOutcome> {
    let raw: Value = serde_json::from_str(text).map_err(EncounterError::InvalidJson)?;
    import_value(&raw)
}

/// Normalize an encounter from an already parsed JSON value.
pub fn import_value(raw: &Value) -> EncounterResult<ImportOutcome> {
    let obj = raw.as_object().ok_or(EncounterError::NotAnObject)?;
    let raw_creatures = obj
        .get("creatures")
        .and_then(Value::as_array)
        .ok_or(EncounterError::CreaturesNotArray)?;

    let creatures: Vec<Creature> = raw_creatures
        .iter()
        .enumerate()
        .map(|(idx, rc)| normalize_creature(rc, idx as i64))
        .collect();

    let max_id = creatures.iter().map(|c| c.id).max().unwrap_or(-1);
    let reported = to_finite_int(obj.get("creatureIdCount")).unwrap_or(0);
    let creature_id_count = reported.max(max_id.saturating_add(1));

    let mut warnings = Vec::new();
    let foreign_version = obj
        .get("battleTrackerVersion")
        .filter(|v| is_truthy(v) && v.as_str() != Some(BATTLE_TRACKER_VERSION));
    if let Some(version) = foreign_version {
        let shown = match version {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        warn!(imported = %shown, "encounter version differs");
        warnings.push(format!(
            "imported version ({shown}) will be exported as {BATTLE_TRACKER_VERSION}"
        ));
    }

    let encounter = BattleTracker {
        creatures,
        creature_id_count,
        round: to_finite_int(obj.get("round")).unwrap_or(0),
        battle_created: to_bool(obj.get("battleCreated")).unwrap_or(false),
        share_enabled: false,
        battle_tracker_version: BATTLE_TRACKER_VERSION.to_string(),
        shared_timestamp: None,
        loaded: true,
    };

    debug!(
        creatures = encounter.creatures.len(),
        creature_id_count, "encounter imported"
    );
    Ok(ImportOutcome {
        encounter,
        warnings,
    })
}

/// Build the export document for an encounter.
///
/// The result is always shaped as a fresh, not-yet-started battle: round 0,
/// no active creature, sharing disabled. Creatures are sorted by id.
pub fn export_value(encounter: &BattleTracker) -> Value {
    let mut sorted: Vec<&Creature> = encounter.creatures.iter().collect();
    sorted.sort_by_key(|c| c.id);

    let creatures: Vec<Value> = sorted.into_iter().map(export_creature).collect();
    let creature_id_count = encounter
        .creature_id_count
        .max(encounter.max_creature_id().saturating_add(1));

    json!({
        "creatures": creatures,
        "creatureIdCount": creature_id_count,
        "activeCreature": null,
        "round": 0,
        "battleCreated": false,
        "shareEnabled": false,
        "battleTrackerVersion": BATTLE_TRACKER_VERSION,
        "sharedTimestamp": null,
        "loaded": true,
    })
}

/// Export document as pretty-printed JSON.
pub fn export_json(encounter: &BattleTracker) -> EncounterResult<String> {
    Ok(serde_json::to_string_pretty(&export_value(encounter))?)
}

fn export_creature(c: &Creature) -> Value {
    let initiative_roll = c.initiative.map(|init| {
        json!({
            "result": init,
            "terms": [{ "type": "integer", "term": init.to_string() }],
        })
    });

    json!({
        "name": c.name,
        "initiative": c.initiative,
        "initiativeRoll": initiative_roll,
        "initiativeTieBreaker": null,
        "healthPoints": c.health_points,
        "maxHealthPoints": c.max_health_points,
        "armorClass": c.armor_class,
        "temporaryHealthPoints": c.temporary_health_points,
        "id": c.id,
        "alive": c.alive,
        "conditions": c.conditions,
        "notes": c.notes,
        "locked": false,
        "shared": c.shared,
        "hitPointsShared": c.hit_points_shared,
        "statBlock": null,
        "totalSpellSlots": c.total_spell_slots,
        "usedSpellSlots": c.used_spell_slots,
        "spells": c.spells,
    })
}

fn normalize_creature(rc: &Value, idx: i64) -> Creature {
    let id = to_finite_int(rc.get("id")).unwrap_or(idx);
    let hp = to_finite_int(rc.get("healthPoints")).unwrap_or(0);
    let max_hp = to_finite_int(rc.get("maxHealthPoints")).unwrap_or(hp);

    let armor_class = match rc.get("armorClass") {
        Some(Value::Number(n)) => ArmorClass::Number(n.clone()),
        Some(Value::String(s)) => ArmorClass::Text(s.clone()),
        _ => ArmorClass::default(),
    };

    Creature {
        name: to_str(rc.get("name")).unwrap_or_else(|| Creature::default_name(id)),
        initiative: to_finite_int_nullable(rc.get("initiative")),
        health_points: hp,
        max_health_points: max_hp,
        armor_class,
        temporary_health_points: to_finite_int_nullable(rc.get("temporaryHealthPoints")),
        id,
        alive: to_bool(rc.get("alive")).unwrap_or(true),
        conditions: normalize_conditions(rc.get("conditions")),
        notes: normalize_notes(rc.get("notes")),
        shared: to_bool(rc.get("shared")).unwrap_or(true),
        hit_points_shared: to_bool(rc.get("hitPointsShared")).unwrap_or(true),
        total_spell_slots: normalize_slots(rc.get("totalSpellSlots")),
        used_spell_slots: normalize_slots(rc.get("usedSpellSlots")),
        spells: normalize_spells(rc.get("spells")),
    }
}

fn normalize_notes(raw: Option<&Value>) -> Vec<Note> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, n)| Note {
            text: to_str(n.get("text")).unwrap_or_default(),
            applied_at_round: to_finite_int(n.get("appliedAtRound")).unwrap_or(0),
            applied_at_seconds: to_finite_int(n.get("appliedAtSeconds")).unwrap_or(0),
            id: to_finite_int(n.get("id")).unwrap_or(idx as i64),
        })
        .collect()
}

fn normalize_conditions(raw: Option<&Value>) -> Vec<Condition> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, c)| Condition {
            text: to_str(c.get("text")).unwrap_or_default(),
            applied_at_round: to_finite_int(c.get("appliedAtRound")).unwrap_or(0),
            applied_at_seconds: to_finite_int(c.get("appliedAtSeconds")).unwrap_or(0),
            url: to_str(c.get("url")).unwrap_or_default(),
            id: to_str(c.get("id")).unwrap_or_else(|| format!("cond-{idx}")),
        })
        .collect()
}

fn normalize_slots(raw: Option<&Value>) -> Option<SpellSlots> {
    match raw? {
        Value::Object(map) => {
            let mut out = SpellSlots::new();
            for level in SpellLevel::ALL {
                if let Some(v) = to_finite_int(map.get(level.key())) {
                    out.insert(level, v.max(0));
                }
            }
            Some(out)
        }
        // An array is an object too in the tracker's eyes, just one with no levels.
        Value::Array(_) => Some(SpellSlots::new()),
        _ => None,
    }
}

fn normalize_spells(raw: Option<&Value>) -> BTreeMap<String, Spell> {
    let spell = |v: &Value, default_label: String| Spell {
        label: to_str(v.get("label")).unwrap_or(default_label),
        total: to_finite_int(v.get("total")).unwrap_or(1).max(1),
    };

    match raw {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, v)| (key.clone(), spell(v, key.clone())))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("spell{}", i + 1), spell(v, format!("Spell {}", i + 1))))
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn to_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn to_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

/// Numeric coercion with the tracker's loose rules: numbers are floored,
/// numeric strings are parsed, booleans count as 0/1, `null` and blank
/// strings count as 0. An empty array counts as 0 and a one-element array
/// coerces its element through its text form, so `[7]` is 7 but `[true]` is
/// not a number. Missing values, objects, longer arrays and non-finite
/// results give `None`.
fn to_finite_int(value: Option<&Value>) -> Option<i64> {
    let n = match value? {
        Value::Null => return Some(0),
        Value::Bool(b) => return Some(i64::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64()?
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0);
            }
            trimmed.parse::<f64>().ok()?
        }
        Value::Array(items) => {
            return match items.as_slice() {
                [] => Some(0),
                [Value::Bool(_) | Value::Object(_)] => None,
                [single] => to_finite_int(Some(single)),
                _ => None,
            };
        }
        Value::Object(_) => return None,
    };
    n.is_finite().then(|| n.floor() as i64)
}

/// Like [`to_finite_int`], but missing, `null` and `""` mean "no value".
fn to_finite_int_nullable(value: Option<&Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        other => to_finite_int(other),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
