use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn presence_migrate() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin("presence-migrate"));
    cmd.env("LOG_LEVEL", "error").env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_legacy_command_migrates_and_deletes_source() {
    let dir = tempdir().unwrap();
    let properties = dir.path().join("craftpresence.properties");
    let config = dir.path().join("craftpresence.json");
    fs::write(&properties, "DEBUG_MODE=true\nCLIENT_ID=42\n").unwrap();

    presence_migrate()
        .arg("legacy")
        .arg("--config")
        .arg(&config)
        .arg("--properties")
        .arg(&properties)
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated"));

    assert!(!properties.exists());
    let json = read_json(&config);
    assert_eq!(json["advancedSettings"]["debugMode"], Value::Bool(true));
    assert_eq!(json["generalSettings"]["clientId"], "42");
}

#[test]
fn test_simple_rpc_command_reports_missing_file() {
    let dir = tempdir().unwrap();

    presence_migrate()
        .arg("simple-rpc")
        .arg("--config")
        .arg(dir.path().join("craftpresence.json"))
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No simple-rpc.toml found"));
}

#[test]
fn test_replace_command_applies_rules() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("craftpresence.json");
    fs::write(
        &config,
        r#"{ "statusMessages": { "mainMenuData": { "textOverride": "{world.day}" } } }"#,
    )
    .unwrap();

    presence_migrate()
        .args(["replace", "--placeholders", "--rule", "world.day=world.time.day"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 replacement"));

    let json = read_json(&config);
    assert_eq!(
        json["statusMessages"]["mainMenuData"]["textOverride"],
        "{world.time.day}"
    );
}

#[test]
fn test_replace_command_rejects_malformed_rule() {
    let dir = tempdir().unwrap();

    presence_migrate()
        .args(["replace", "--rule", "no-separator"])
        .arg("--config")
        .arg(dir.path().join("craftpresence.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("OLD=NEW"));
}

#[test]
fn test_migrate_command_upgrades_old_schema() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("craftpresence.json");
    fs::write(
        &config,
        r#"{
            "_schemaVersion": 1,
            "generalSettings": { "showTime": false },
            "displaySettings": { "presenceData": { "details": "{data.screen.class}" } }
        }"#,
    )
    .unwrap();

    presence_migrate()
        .arg("migrate")
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("schema v6"));

    let json = read_json(&config);
    assert_eq!(json["_schemaVersion"], 6);
    assert_eq!(json["displaySettings"]["presenceData"]["startTimestamp"], "");
    assert_eq!(
        json["displaySettings"]["presenceData"]["details"],
        "{getClass(data.screen.instance)}"
    );
}

#[test]
fn test_migrate_command_with_nothing_to_do() {
    let dir = tempdir().unwrap();

    presence_migrate()
        .arg("migrate")
        .arg("--config-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to migrate"));
}

#[test]
fn test_translate_command() {
    presence_migrate()
        .args(["translate", "&SERVER:PLAYERINFO:COORDS:xPosition&"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{player.position.x}"));

    presence_migrate()
        .args(["translate", "--simple-rpc", "%player% on %servername%"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{player.name} on {server.name}"));
}
