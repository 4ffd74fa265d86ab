use presence_config::access::ConfigAccess;
use presence_config::migration::simple_rpc::{
    SimpleRpcMigrator, SimpleRpcOutcome, MAIN_FILE, REPLAY_MOD_FILE, SERVER_ENTRIES_FILE,
};
use presence_config::ConfigTree;
use presence_core::error::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const MAIN_CONFIG: &str = r#"
[general]
version = 17
applicationID = "4242"
debugging = true
launcherIntegration = false

[dimension_overrides]
enabled = true
dimensions = [
    { name = "overworld", description = "Exploring %world%", largeImageKey = ["grass", "%playerhead%"] },
    { name = "biome:plains", description = "In %biome%" },
]

[custom]
variables = [
    { name = "greeting", value = "Hi %player%", enabled = false },
]

[init]
description = "Loading"
largeImageKey = "logo"

[main_menu]
description = "Main menu"
state = "%mcver%"

[server_list]
description = "Browsing servers"

[single_player]
description = "Playing %savename%"

[multi_player]
description = "On %servername%"
buttons = [
    { label = "Join", url = "https://example.com" },
]

[generic]
description = "%player%"
"#;

const SERVER_ENTRIES: &str = r#"
version = 1
enabled = true
entry = [
    { ip = "mc.example.com", description = "On %ServerName%", largeImageKey = ["first", "second"] },
]
"#;

const REPLAY_MOD: &str = r#"
[general]
version = 1

[replay_viewer]
description = "Watching %replaytime% / %replaytimeleft%"
"#;

fn get(tree: &ConfigTree, path: &[&str]) -> Value {
    tree.get(path).unwrap_or(Value::Null)
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_main_config_is_migrated() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), MAIN_FILE, MAIN_CONFIG);
    let mut tree = ConfigTree::load(dir.path().join("craftpresence.json"))?;

    let outcome = SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    assert_eq!(
        outcome,
        SimpleRpcOutcome::Migrated {
            config_version: 17,
            server_entries_version: None,
            replay_mod_version: None,
        }
    );
    assert_eq!(get(&tree, &["generalSettings", "clientId"]), json!("4242"));
    assert_eq!(get(&tree, &["advancedSettings", "debugMode"]), json!(true));
    assert_eq!(
        get(&tree, &["generalSettings", "detectCurseManifest"]),
        json!(false)
    );
    assert_eq!(
        get(&tree, &["displaySettings", "dynamicVariables", "greeting"]),
        json!("Hi {player.name}")
    );
    assert_eq!(
        get(&tree, &["displaySettings", "presenceData", "details"]),
        json!("{player.name}")
    );
    assert!(dir.path().join("craftpresence.json").exists());
    Ok(())
}

#[test]
fn test_dimension_overrides_use_image_pools() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), MAIN_FILE, MAIN_CONFIG);
    let mut tree = ConfigTree::new();

    SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    let overworld = get(&tree, &["dimensionSettings", "dimensionData", "overworld", "data"]);
    assert_eq!(overworld["details"], json!("Exploring {dimension.name}"));
    assert_eq!(
        overworld["largeImageKey"],
        json!("{randomString('grass',getResult({player.icon}))}")
    );
    assert_eq!(overworld["enabled"], json!(true));
    assert_eq!(overworld["useAsMain"], json!(true));

    let plains = get(&tree, &["biomeSettings", "biomeData", "plains", "data"]);
    assert_eq!(plains["details"], json!("In {biome.name}"));
    Ok(())
}

#[test]
fn test_status_and_gui_sections() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), MAIN_FILE, MAIN_CONFIG);
    let mut tree = ConfigTree::new();

    SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    assert_eq!(
        get(&tree, &["statusMessages", "loadingData", "data", "details"]),
        json!("Loading")
    );
    assert_eq!(
        get(&tree, &["statusMessages", "mainMenuData", "data", "gameState"]),
        json!("{general.version}")
    );
    assert_eq!(
        get(&tree, &["statusMessages", "singleplayerData", "data", "enabled"]),
        json!(false)
    );
    assert_eq!(
        get(&tree, &["serverSettings", "serverData", "default", "data", "buttons", "button_1"]),
        json!({ "label": "Join", "url": "https://example.com" })
    );
    assert_eq!(
        get(&tree, &["advancedSettings", "guiSettings", "guiData", "GuiMultiplayer", "data", "details"]),
        json!("Browsing servers")
    );
    assert_eq!(get(&tree, &["advancedSettings", "enablePerGui"]), json!(true));
    assert_eq!(
        tree.get(&["advancedSettings", "guiSettings", "guiData", "GuiScreenRealmsProxy"]),
        None
    );
    Ok(())
}

#[test]
fn test_companion_files_are_read_in_order() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), MAIN_FILE, MAIN_CONFIG);
    write(dir.path(), SERVER_ENTRIES_FILE, SERVER_ENTRIES);
    write(dir.path(), REPLAY_MOD_FILE, REPLAY_MOD);
    let mut tree = ConfigTree::new();

    let outcome = SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    assert_eq!(
        outcome,
        SimpleRpcOutcome::Migrated {
            config_version: 17,
            server_entries_version: Some(1),
            replay_mod_version: Some(1),
        }
    );

    // Server entries v1 predates image pools, so only the first candidate is kept
    let server = get(&tree, &["serverSettings", "serverData", "mc.example.com", "data"]);
    assert_eq!(server["details"], json!("On {server.name}"));
    assert_eq!(server["largeImageKey"], json!("first"));

    assert_eq!(
        get(&tree, &["advancedSettings", "guiSettings", "guiData", "GuiReplayViewer", "data", "details"]),
        json!("Watching {replaymod.time.current} / {replaymod.time.remaining}")
    );
    Ok(())
}

#[test]
fn test_outdated_main_config_changes_nothing() -> Result<()> {
    let dir = tempdir()?;
    write(
        dir.path(),
        MAIN_FILE,
        &MAIN_CONFIG.replace("version = 17", "version = 12"),
    );
    let mut tree = ConfigTree::new();
    let before = tree.as_value().clone();

    let outcome = SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    assert_eq!(outcome, SimpleRpcOutcome::Unsupported { found: 12 });
    assert_eq!(tree.as_value(), &before);
    Ok(())
}

#[test]
fn test_invalid_toml_is_unreadable() -> Result<()> {
    let dir = tempdir()?;
    write(dir.path(), MAIN_FILE, "[general\nversion = ");
    let mut tree = ConfigTree::new();

    let outcome = SimpleRpcMigrator::from_dir(32, dir.path()).migrate(&mut tree);

    assert_eq!(outcome, SimpleRpcOutcome::Unreadable);
    Ok(())
}
