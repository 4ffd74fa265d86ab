use presence_config::access::ConfigAccess;
use presence_config::migration::LegacyMigrator;
use presence_config::testing::MemoryConfig;
use presence_config::{ConfigTree, SCHEMA_VERSION};
use presence_core::error::Result;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const LEGACY_FILE: &str = "\
# CraftPresence legacy settings
SCHEMA_VERSION=2
SPLIT_CHARACTER=;
DETECT_CURSE_MANIFEST=false
CLIENT_ID=123456789
REFRESH_RATE=5
DETAILS_MESSAGE_FORMAT=&MAINMENU&
DIMENSION_MESSAGES=[overworld;In &DIMENSION&;grass, the_nether;Burning]
";

fn write_legacy(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("craftpresence.properties");
    fs::write(&path, contents).unwrap();
    path
}

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = write_legacy(dir.path(), LEGACY_FILE);
    (dir, path)
}

#[test]
fn test_legacy_values_land_in_modern_paths() -> Result<()> {
    let (_dir, path) = fixture();
    let mut config = MemoryConfig::from_default_config()?;

    let report = LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    assert!(report.loaded);
    assert_eq!(
        config.get_dotted("generalSettings.detectCurseManifest"),
        Some(json!(false))
    );
    assert_eq!(
        config.get_dotted("generalSettings.clientId"),
        Some(json!("123456789"))
    );
    assert_eq!(config.get_dotted("advancedSettings.refreshRate"), Some(json!(5)));
    assert_eq!(
        config.get_dotted("displaySettings.presenceData.details"),
        Some(json!("{menu.message}"))
    );
    assert_eq!(config.get(&["_schemaVersion"]), Some(json!(SCHEMA_VERSION)));
    assert_eq!(config.saves(), 1);
    Ok(())
}

#[test]
fn test_module_collection_entries_are_translated() -> Result<()> {
    let (_dir, path) = fixture();
    let mut config = MemoryConfig::from_default_config()?;

    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    let dimensions = config
        .get_dotted("dimensionSettings.dimensionData")
        .unwrap_or_default();
    assert_eq!(
        dimensions["overworld"],
        json!({ "textOverride": "In {dimension.name}", "iconOverride": "grass" })
    );
    assert_eq!(dimensions["the_nether"], json!({ "textOverride": "Burning" }));
    Ok(())
}

#[test]
fn test_second_run_makes_no_writes() -> Result<()> {
    let dir = tempdir()?;
    let mut config = MemoryConfig::from_default_config()?;

    let path = write_legacy(dir.path(), LEGACY_FILE);
    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);
    assert!(config.set_calls() > 0);

    config.reset_counters();
    let path = write_legacy(dir.path(), LEGACY_FILE);
    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    assert_eq!(config.set_calls(), 0);
    Ok(())
}

#[test]
fn test_boolean_property_accepts_only_boolean_text() -> Result<()> {
    let dir = tempdir()?;
    let mut config = MemoryConfig::from_default_config()?;

    let path = write_legacy(dir.path(), "DEBUG_MODE=true\n");
    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);
    assert_eq!(config.get_dotted("advancedSettings.debugMode"), Some(json!(true)));

    let path = write_legacy(dir.path(), "DEBUG_MODE=sometimes\n");
    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);
    assert_eq!(config.get_dotted("advancedSettings.debugMode"), Some(json!(true)));
    Ok(())
}

#[test]
fn test_pair_collection_split_on_custom_character() -> Result<()> {
    let dir = tempdir()?;
    let tree = json!({
        "pairMessages": { "default": { "first": "", "second": null } }
    });
    let mut config = MemoryConfig::new(tree);

    let path = write_legacy(
        dir.path(),
        "SPLIT_CHARACTER=-\nPAIR_MESSAGES=[a-&IGN&-2,b-3-4]\n",
    );
    LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    let pairs = config.get(&["pairMessages"]).unwrap_or_default();
    let entries = pairs.as_object().map(|map| map.len()).unwrap_or_default();
    assert_eq!(entries, 2);
    assert_eq!(
        pairs["a"],
        json!({ "first": "{custom.player_info_out}", "second": "2" })
    );
    assert_eq!(pairs["b"], json!({ "first": "3", "second": "4" }));
    Ok(())
}

#[test]
fn test_source_file_is_deleted() -> Result<()> {
    let (_dir, path) = fixture();
    let mut config = MemoryConfig::from_default_config()?;

    let report = LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    assert!(report.deleted);
    assert!(!path.exists());
    Ok(())
}

#[test]
fn test_unreadable_source_still_returns_report() -> Result<()> {
    let dir = tempdir()?;
    let missing = dir.path().join("craftpresence.properties");
    let mut config = MemoryConfig::from_default_config()?;

    let report = LegacyMigrator::new(&missing, "UTF-8").migrate(&mut config);

    assert!(!report.loaded);
    assert!(!report.deleted);
    assert!(report.migrated.is_empty());
    assert_eq!(config.saves(), 1);
    Ok(())
}

#[test]
fn test_rejected_value_leaves_config_tree_unchanged() -> Result<()> {
    let dir = tempdir()?;
    let config_path = dir.path().join("craftpresence.json");
    let mut tree = ConfigTree::load(&config_path)?;

    let path = write_legacy(dir.path(), "REFRESH_RATE=99999999999\nDEBUG_MODE=true\n");
    let report = LegacyMigrator::new(&path, "UTF-8").migrate(&mut tree);

    assert_eq!(report.migrated, vec!["advancedSettings.debugMode".to_string()]);
    assert_eq!(tree.get_dotted("advancedSettings.refreshRate"), Some(json!(2)));
    assert!(config_path.exists());
    Ok(())
}

#[test]
fn test_render_tooltips_lands_in_accessibility_settings() -> Result<()> {
    let dir = tempdir()?;
    let mut config = MemoryConfig::from_default_config()?;

    let path = write_legacy(dir.path(), "RENDER_TOOLTIPS=false\n");
    let report = LegacyMigrator::new(&path, "UTF-8").migrate(&mut config);

    assert_eq!(
        report.migrated,
        vec!["accessibilitySettings.renderTooltips".to_string()]
    );
    assert_eq!(
        config.get_dotted("accessibilitySettings.renderTooltips"),
        Some(json!(false))
    );
    Ok(())
}

#[test]
fn test_migration_with_debug_logging_enabled() -> Result<()> {
    let (_dir, path) = fixture();
    let mut config = MemoryConfig::from_default_config()?;
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();

    let report = tracing::subscriber::with_default(subscriber, || {
        LegacyMigrator::new(&path, "UTF-8").migrate(&mut config)
    });

    assert!(report.loaded);
    assert!(report
        .migrated
        .contains(&"advancedSettings.refreshRate".to_string()));
    assert_eq!(config.get_dotted("advancedSettings.refreshRate"), Some(json!(5)));
    Ok(())
}
