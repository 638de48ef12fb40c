//! End-to-end tests for the `dmh` binary against a throwaway data directory.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `dmh` command pointed at an isolated data directory.
fn dmh(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dmh").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("DMH_DATA_DIR")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir);
    cmd
}

const GOBLIN_AMBUSH: &str = r#"{
    "creatures": [
        {"name": "Goblin", "initiative": "14", "healthPoints": 7, "maxHealthPoints": 7, "armorClass": 15, "id": 0},
        {"id": 3, "healthPoints": 11}
    ],
    "creatureIdCount": 2,
    "battleTrackerVersion": "5.100.0"
}"#;

/// Import the sample encounter and return its saved id.
fn import_sample(dir: &TempDir) -> String {
    let file = dir.path().join("ambush.json");
    fs::write(&file, GOBLIN_AMBUSH).unwrap();
    dmh(dir.path())
        .args(["encounter", "import"])
        .arg(&file)
        .args(["--title", "Goblin Ambush"])
        .assert()
        .success();

    newest_id(dir)
}

/// Id of the most recently created saved encounter.
fn newest_id(dir: &TempDir) -> String {
    let raw = fs::read_to_string(dir.path().join("encounters.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    saved[0]["id"].as_str().unwrap().to_string()
}

/// Run `dmh encounter <args>` and expect success.
fn encounter_ok(dir: &TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    dmh(dir.path())
        .arg("encounter")
        .args(args)
        .assert()
        .success()
}

// ---------------------------------------------------------------------------
// date / advance / set / reset
// ---------------------------------------------------------------------------

#[test]
fn date_starts_at_epoch() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .arg("date")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Primavera, Year 1000, 05:00"))
        .stdout(predicate::str::contains("Segunda"))
        .stdout(predicate::str::contains("Lua Nova"))
        .stdout(predicate::str::contains("Gratidão a Luuren"));
}

#[test]
fn advance_hours_rolls_over_midnight() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["advance", "--hours", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 2 of Primavera, Year 1000, 01:00"))
        .stdout(predicate::str::contains("Terça"));

    assert!(dir.path().join("world-date.json").exists());
    dmh(dir.path())
        .arg("date")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 2 of Primavera, Year 1000, 01:00"));
}

#[test]
fn advance_accumulates_across_runs() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["advance", "--days", "29"])
        .assert()
        .success();
    dmh(dir.path())
        .args(["advance", "--days", "1", "--minutes", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Verão, Year 1000, 05:30"))
        .stdout(predicate::str::contains("Dia de Pulacc"));
}

#[test]
fn advance_negative_clamps_to_epoch() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["advance", "--days", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Primavera, Year 1000, 05:00"));
}

#[test]
fn advance_requires_an_amount() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .arg("advance")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to advance"));
}

#[test]
fn set_and_read_back() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["set", "1002", "summer", "7", "--hour", "9", "--minute", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 7 of Verão, Year 1002, 09:05"));

    let raw = fs::read_to_string(dir.path().join("world-date.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["year"], 1002);
    assert_eq!(saved["season"], "summer");
    assert_eq!(saved["day"], 7);
}

#[test]
fn set_accepts_portuguese_season_names() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["set", "1000", "Inverno", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 30 of Inverno, Year 1000, 00:00"))
        .stdout(predicate::str::contains("Grande Festança de Luna"));
}

#[test]
fn set_rejects_bad_day() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["set", "1000", "spring", "31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid date"));
    assert!(!dir.path().join("world-date.json").exists());
}

#[test]
fn set_rejects_unknown_season() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["set", "1000", "monsoon", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown season"));
}

#[test]
fn reset_returns_to_epoch() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["advance", "--days", "100"])
        .assert()
        .success();
    dmh(dir.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Primavera, Year 1000, 05:00"));
}

#[test]
fn corrupt_date_file_falls_back_to_epoch() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("world-date.json"), "not json").unwrap();
    dmh(dir.path())
        .arg("date")
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1 of Primavera, Year 1000, 05:00"));
}

#[test]
fn data_dir_from_env() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("dmh")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("DMH_DATA_DIR", dir.path())
        .args(["advance", "--days", "1"])
        .assert()
        .success();
    assert!(dir.path().join("world-date.json").exists());
}

// ---------------------------------------------------------------------------
// grid / events
// ---------------------------------------------------------------------------

#[test]
fn grid_shows_season_and_festivals() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["grid", "--season", "spring", "--year", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Primavera"))
        .stdout(predicate::str::contains("Seg"))
        .stdout(predicate::str::contains("Dom"))
        .stdout(predicate::str::contains("Gratidão a Luuren"))
        .stdout(predicate::str::contains("Dia da Criatividade"));
}

#[test]
fn grid_defaults_to_current_season() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["set", "1001", "autumn", "3"])
        .assert()
        .success();
    dmh(dir.path())
        .arg("grid")
        .assert()
        .success()
        .stdout(predicate::str::contains("Outono"))
        .stdout(predicate::str::contains("Chegada do Outono"));
}

#[test]
fn events_lists_every_festival() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("18"))
        .stdout(predicate::str::contains("Dia de Luna"));
}

#[test]
fn events_filtered_by_season() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["events", "--season", "winter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dia dos Presentes"))
        .stdout(predicate::str::contains("Gratidão a Luuren").not());
}

// ---------------------------------------------------------------------------
// encounter
// ---------------------------------------------------------------------------

#[test]
fn encounter_list_empty() {
    let dir = TempDir::new().unwrap();
    dmh(dir.path())
        .args(["encounter", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved encounters"));
}

#[test]
fn encounter_import_warns_on_version() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("ambush.json");
    fs::write(&file, GOBLIN_AMBUSH).unwrap();
    dmh(dir.path())
        .args(["encounter", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"))
        .stdout(predicate::str::contains("'ambush'"))
        .stdout(predicate::str::contains("2 creatures"))
        .stderr(predicate::str::contains("5.100.0"));
}

#[test]
fn encounter_import_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{ creatures: ").unwrap();
    dmh(dir.path())
        .args(["encounter", "import"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn encounter_import_rejects_missing_creatures() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.json");
    fs::write(&file, r#"{"round": 1}"#).unwrap();
    dmh(dir.path())
        .args(["encounter", "import"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"creatures\" must be an array"));
}

#[test]
fn encounter_list_and_show() {
    let dir = TempDir::new().unwrap();
    let id = import_sample(&dir);

    dmh(dir.path())
        .args(["encounter", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin Ambush"))
        .stdout(predicate::str::contains(id.as_str()));

    dmh(dir.path())
        .args(["encounter", "show", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin"))
        .stdout(predicate::str::contains("Creature #4"))
        .stdout(predicate::str::contains("7/7"))
        .stdout(predicate::str::contains("11/11"));
}

#[test]
fn encounter_export_to_file() {
    let dir = TempDir::new().unwrap();
    let id = import_sample(&dir);
    let out = dir.path().join("out.json");

    dmh(dir.path())
        .args(["encounter", "export", id.as_str(), "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(exported["battleTrackerVersion"], "5.123.0");
    assert_eq!(exported["creatureIdCount"], 4);
    assert_eq!(exported["round"], 0);
    assert_eq!(exported["creatures"][0]["initiative"], 14);
    assert_eq!(exported["creatures"][1]["name"], "Creature #4");
}

#[test]
fn encounter_export_to_stdout() {
    let dir = TempDir::new().unwrap();
    let id = import_sample(&dir);
    dmh(dir.path())
        .args(["encounter", "export", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"creatureIdCount\": 4"));
}

#[test]
fn encounter_duplicate_and_delete() {
    let dir = TempDir::new().unwrap();
    let id = import_sample(&dir);

    dmh(dir.path())
        .args(["encounter", "duplicate", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin Ambush (copy)"));

    dmh(dir.path())
        .args(["encounter", "delete", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    dmh(dir.path())
        .args(["encounter", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Goblin Ambush (copy)"));
}

#[test]
fn encounter_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    for sub in ["show", "export", "delete", "duplicate"] {
        dmh(dir.path())
            .args(["encounter", sub, "nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("saved encounter not found: nope"));
    }
}

// ---------------------------------------------------------------------------
// encounter editing
// ---------------------------------------------------------------------------

#[test]
fn encounter_build_from_scratch() {
    let dir = TempDir::new().unwrap();
    encounter_ok(&dir, &["new", "Crypt"]).stdout(predicate::str::contains("Created 'Crypt'"));
    let id = newest_id(&dir);
    let id = id.as_str();

    encounter_ok(
        &dir,
        &[
            "add", id, "--name", "Skeleton", "--hp", "13", "--ac", "13", "--init", "12",
            "--qty", "2",
        ],
    )
    .stdout(predicate::str::contains("2 creatures (id 0, 1)"));
    encounter_ok(&dir, &["add", id]).stdout(predicate::str::contains("(id 2)"));

    encounter_ok(&dir, &["show", id])
        .stdout(predicate::str::contains("Skeleton"))
        .stdout(predicate::str::contains("13/13"))
        .stdout(predicate::str::contains("Creature #3"));

    let exported: serde_json::Value = serde_json::from_str(
        &String::from_utf8(
            dmh(dir.path())
                .args(["encounter", "export", id])
                .output()
                .unwrap()
                .stdout,
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(exported["creatureIdCount"], 3);
    assert_eq!(exported["creatures"][0]["armorClass"], 13);
    assert_eq!(exported["creatures"][1]["initiative"], 12);
}

#[test]
fn encounter_edit_and_remove_creatures() {
    let dir = TempDir::new().unwrap();
    encounter_ok(&dir, &["new", "Crypt"]);
    let id = newest_id(&dir);
    let id = id.as_str();
    encounter_ok(&dir, &["add", id, "--name", "Skeleton", "--hp", "13", "--qty", "2"]);

    encounter_ok(&dir, &["edit", id, "1", "--hp", "0", "--dead", "--ac", "12 (armor scraps)"])
        .stdout(predicate::str::contains("Updated Skeleton"));
    encounter_ok(&dir, &["show", id])
        .stdout(predicate::str::contains("Skeleton (dead)"))
        .stdout(predicate::str::contains("0/13"))
        .stdout(predicate::str::contains("12 (armor scraps)"));

    encounter_ok(&dir, &["remove", id, "1"]).stdout(predicate::str::contains("Removed Skeleton"));
    encounter_ok(&dir, &["show", id]).stdout(predicate::str::contains("(dead)").not());

    encounter_ok(&dir, &["rename", id, "Crypt of Bones"]);
    encounter_ok(&dir, &["list"]).stdout(predicate::str::contains("Crypt of Bones"));
}

#[test]
fn encounter_notes_slots_and_spells() {
    let dir = TempDir::new().unwrap();
    encounter_ok(&dir, &["new", "Tower"]);
    let id = newest_id(&dir);
    let id = id.as_str();
    encounter_ok(&dir, &["add", id, "--name", "Mage", "--hp", "40"]);

    encounter_ok(&dir, &["note", id, "0", "counterspell ready"])
        .stdout(predicate::str::contains("Added note #0"));
    encounter_ok(&dir, &["caster", id, "0"]);
    encounter_ok(&dir, &["slot", id, "0", "3", "--total", "3", "--used", "5"])
        .stdout(predicate::str::contains("3rd level slots updated"));
    encounter_ok(&dir, &["spell", id, "0", "Bola de Fogo", "--uses", "2"])
        .stdout(predicate::str::contains("Added spell [boladefogo]"));

    encounter_ok(&dir, &["show", id])
        .stdout(predicate::str::contains("counterspell ready"))
        .stdout(predicate::str::contains("3rd 3/3"))
        .stdout(predicate::str::contains("Bola de Fogo x2"));

    encounter_ok(&dir, &["unnote", id, "0", "0"]);
    encounter_ok(&dir, &["unspell", id, "0", "boladefogo"]);
    encounter_ok(&dir, &["show", id])
        .stdout(predicate::str::contains("counterspell ready").not())
        .stdout(predicate::str::contains("Bola de Fogo").not())
        .stdout(predicate::str::contains("3rd 3/3"));
}

#[test]
fn encounter_edit_errors() {
    let dir = TempDir::new().unwrap();
    encounter_ok(&dir, &["new", "Empty"]);
    let id = newest_id(&dir);
    let id = id.as_str();
    encounter_ok(&dir, &["add", id, "--name", "Rat"]);

    dmh(dir.path())
        .args(["encounter", "edit", id, "9", "--hp", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("creature not found: 9"));
    dmh(dir.path())
        .args(["encounter", "slot", id, "0", "10", "--total", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spell level must be 1-9"));
    dmh(dir.path())
        .args(["encounter", "note", id, "0", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note text cannot be empty"));
    dmh(dir.path())
        .args(["encounter", "add", "nope", "--name", "Rat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("saved encounter not found: nope"));
}
