use std::path::Path;

use chrono::DateTime;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dmh_encounter::{
    ArmorClass, BattleTracker, CreatureDraft, EncounterError, EncounterPatch, EncounterResult,
    SavedEncounter, SlotKind, SpellLevel, SpellSlots, export_json, import_json,
};
use tracing::info;

use crate::config::CliConfig;

pub fn list(config: &CliConfig) -> Result<(), String> {
    let saved = config.encounter_store().list();
    if saved.is_empty() {
        println!("  No saved encounters.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Creatures", "Updated"]);

    for encounter in &saved {
        table.add_row(vec![
            encounter.id.clone(),
            encounter.title.clone(),
            encounter.data.creatures.len().to_string(),
            format_millis(encounter.updated_at),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn import(config: &CliConfig, file: &Path, title: Option<&str>) -> Result<(), String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let outcome = import_json(&text).map_err(|e| format!("{}: {e}", file.display()))?;

    for warning in &outcome.warnings {
        eprintln!("  {} {warning}", "warning:".yellow().bold());
    }

    let title = title
        .map(str::to_string)
        .or_else(|| file.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let saved = config
        .encounter_store()
        .create(&title, outcome.encounter)
        .map_err(|e| e.to_string())?;

    info!(id = %saved.id, file = %file.display(), "encounter imported");
    println!(
        "  {} '{}' ({} creature{})",
        "Imported".bold(),
        saved.title,
        saved.data.creatures.len(),
        if saved.data.creatures.len() == 1 { "" } else { "s" }
    );
    println!("  id: {}", saved.id.dimmed());
    Ok(())
}

pub fn export(config: &CliConfig, id: &str, output: Option<&Path>) -> Result<(), String> {
    let saved = find(config, id)?;
    let content = export_json(&saved.data).map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}

pub fn show(config: &CliConfig, id: &str) -> Result<(), String> {
    let saved = find(config, id)?;
    let tracker = &saved.data;

    println!("  {} [{}]", saved.title.bold(), saved.id.dimmed());
    println!();

    if tracker.creatures.is_empty() {
        println!("  No creatures.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Init", "Name", "HP", "AC", "Conditions", "Slots", "Spells",
    ]);

    for creature in tracker.initiative_order() {
        let name = if creature.alive {
            creature.name.clone()
        } else {
            format!("{} (dead)", creature.name)
        };
        let conditions: Vec<&str> = creature.conditions.iter().map(|c| c.text.as_str()).collect();
        let spells: Vec<String> = creature
            .spells
            .iter()
            .map(|(key, s)| format!("{} x{} [{key}]", s.label, s.total))
            .collect();
        table.add_row(vec![
            creature.id.to_string(),
            creature
                .initiative
                .map(|i| i.to_string())
                .unwrap_or_else(|| "-".into()),
            name,
            format!("{}/{}", creature.health_points, creature.max_health_points),
            creature.armor_class.to_string(),
            conditions.join(", "),
            format_slots(
                creature.total_spell_slots.as_ref(),
                creature.used_spell_slots.as_ref(),
            ),
            spells.join(", "),
        ]);
    }

    println!("{table}");

    let noted: Vec<_> = tracker
        .creatures
        .iter()
        .filter(|c| !c.notes.is_empty())
        .collect();
    if !noted.is_empty() {
        println!();
        for creature in noted {
            println!("  {}", creature.name.bold());
            for note in &creature.notes {
                println!("    {} {}", format!("#{}", note.id).dimmed(), note.text);
            }
        }
    }

    Ok(())
}

pub fn new(config: &CliConfig, title: &str) -> Result<(), String> {
    let saved = config
        .encounter_store()
        .create(title, BattleTracker::new())
        .map_err(|e| e.to_string())?;
    println!("  {} '{}'", "Created".bold(), saved.title);
    println!("  id: {}", saved.id.dimmed());
    Ok(())
}

pub fn rename(config: &CliConfig, id: &str, title: &str) -> Result<(), String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("title cannot be empty".into());
    }
    let saved = config
        .encounter_store()
        .update(
            id,
            EncounterPatch {
                title: Some(title.to_string()),
                data: None,
            },
        )
        .map_err(|e| e.to_string())?;
    println!("  Renamed to '{}'", saved.title);
    Ok(())
}

pub fn add(config: &CliConfig, id: &str, draft: &CreatureDraft) -> Result<(), String> {
    let ids = modify(config, id, |tracker| Ok(tracker.add_creatures(draft)))?;
    let listed: Vec<String> = ids.iter().map(i64::to_string).collect();
    println!(
        "  {} {} creature{} (id {})",
        "Added".bold(),
        ids.len(),
        if ids.len() == 1 { "" } else { "s" },
        listed.join(", ")
    );
    Ok(())
}

/// Field changes for `encounter edit`. `None` leaves a field as it is.
#[derive(Debug, Default)]
pub struct CreatureChanges {
    pub name: Option<String>,
    pub hp: Option<i64>,
    pub max_hp: Option<i64>,
    pub initiative: Option<i64>,
    pub ac: Option<String>,
    pub alive: Option<bool>,
}

pub fn edit(
    config: &CliConfig,
    id: &str,
    creature: i64,
    changes: CreatureChanges,
) -> Result<(), String> {
    let name = modify(config, id, |tracker| {
        tracker.update_creature(creature, |c| {
            if let Some(name) = changes.name.filter(|n| !n.trim().is_empty()) {
                c.name = name.trim().to_string();
            }
            if let Some(hp) = changes.hp {
                c.health_points = hp;
            }
            if let Some(max_hp) = changes.max_hp {
                c.max_health_points = max_hp;
            }
            if let Some(initiative) = changes.initiative {
                c.initiative = Some(initiative);
            }
            if let Some(ac) = changes.ac {
                c.armor_class = match ac.trim().parse::<i64>() {
                    Ok(n) => ArmorClass::Number(n.into()),
                    Err(_) => ArmorClass::Text(ac),
                };
            }
            if let Some(alive) = changes.alive {
                c.alive = alive;
            }
        })?;
        Ok(tracker
            .creature(creature)
            .map(|c| c.name.clone())
            .unwrap_or_default())
    })?;
    println!("  {} {name}", "Updated".bold());
    Ok(())
}

pub fn remove(config: &CliConfig, id: &str, creature: i64) -> Result<(), String> {
    let removed = modify(config, id, |tracker| tracker.remove_creature(creature))?;
    println!("  {} {}", "Removed".bold(), removed.name);
    Ok(())
}

pub fn note(config: &CliConfig, id: &str, creature: i64, text: &str) -> Result<(), String> {
    let note_id = modify(config, id, |tracker| tracker.add_note(creature, text))?
        .ok_or("note text cannot be empty")?;
    println!("  Added note #{note_id}");
    Ok(())
}

pub fn unnote(config: &CliConfig, id: &str, creature: i64, note: i64) -> Result<(), String> {
    modify(config, id, |tracker| tracker.remove_note(creature, note))?;
    println!("  Removed note #{note}");
    Ok(())
}

pub fn caster(config: &CliConfig, id: &str, creature: i64) -> Result<(), String> {
    modify(config, id, |tracker| tracker.enable_spellcasting(creature))?;
    println!("  Spell slots enabled");
    Ok(())
}

pub fn slot(
    config: &CliConfig,
    id: &str,
    creature: i64,
    level: u8,
    total: Option<i64>,
    used: Option<i64>,
) -> Result<(), String> {
    let level = SpellLevel::from_number(level)
        .ok_or_else(|| format!("spell level must be 1-9, got {level}"))?;
    if total.is_none() && used.is_none() {
        return Err("nothing to set: pass --total or --used".into());
    }

    modify(config, id, |tracker| {
        if let Some(total) = total {
            tracker.set_spell_slot(creature, SlotKind::Total, level, total)?;
        }
        if let Some(used) = used {
            tracker.set_spell_slot(creature, SlotKind::Used, level, used)?;
        }
        Ok(())
    })?;
    println!("  {level} level slots updated");
    Ok(())
}

pub fn spell(
    config: &CliConfig,
    id: &str,
    creature: i64,
    label: &str,
    uses: i64,
) -> Result<(), String> {
    let key = modify(config, id, |tracker| tracker.add_spell(creature, label, uses))?
        .ok_or("spell label cannot be empty")?;
    println!("  Added spell [{key}]");
    Ok(())
}

pub fn unspell(config: &CliConfig, id: &str, creature: i64, key: &str) -> Result<(), String> {
    modify(config, id, |tracker| tracker.remove_spell(creature, key))?;
    println!("  Removed spell [{key}]");
    Ok(())
}

/// Load a saved encounter, apply `change` to it and save it back.
fn modify<T>(
    config: &CliConfig,
    id: &str,
    change: impl FnOnce(&mut BattleTracker) -> EncounterResult<T>,
) -> Result<T, String> {
    let store = config.encounter_store();
    let mut tracker = find(config, id)?.data;
    let out = change(&mut tracker).map_err(|e| e.to_string())?;
    store
        .update(
            id,
            EncounterPatch {
                title: None,
                data: Some(tracker),
            },
        )
        .map_err(|e| e.to_string())?;
    Ok(out)
}

fn format_slots(total: Option<&SpellSlots>, used: Option<&SpellSlots>) -> String {
    let Some(total) = total else {
        return String::new();
    };
    total
        .iter()
        .map(|(level, n)| {
            let spent = used.and_then(|u| u.get(level)).copied().unwrap_or(0);
            format!("{level} {spent}/{n}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn delete(config: &CliConfig, id: &str) -> Result<(), String> {
    let removed = config
        .encounter_store()
        .delete(id)
        .map_err(|e| e.to_string())?;
    if !removed {
        return Err(EncounterError::EncounterNotFound(id.to_string()).to_string());
    }
    println!("  Deleted {id}");
    Ok(())
}

pub fn duplicate(config: &CliConfig, id: &str) -> Result<(), String> {
    let copy = config
        .encounter_store()
        .duplicate(id)
        .map_err(|e| e.to_string())?;
    println!("  {} '{}'", "Saved".bold(), copy.title);
    println!("  id: {}", copy.id.dimmed());
    Ok(())
}

fn format_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

fn find(config: &CliConfig, id: &str) -> Result<SavedEncounter, String> {
    config
        .encounter_store()
        .get(id)
        .ok_or_else(|| EncounterError::EncounterNotFound(id.to_string()).to_string())
}
