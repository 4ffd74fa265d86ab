//! Migration of SimpleRPC TOML configs (main file, server entries, Replay Mod
//! integration) into the JSON tree.

// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use serde::Serialize;
use serde_json::Value;
use toml::{Table, Value as TomlValue};
use tracing::{debug, error, info};

// Internal imports
use super::presence::MigrationContext;
use super::DataMigrator;
use crate::access::ConfigAccess;
use crate::elements::ModuleData;
use presence_core::error::{PresenceError, Result};
use presence_core::msg_format;
use presence_messages::MESSAGES;

/// Oldest main-config version that can be read.
pub const LOWEST_SUPPORTED: i64 = 13;

pub const MAIN_FILE: &str = "simple-rpc.toml";
pub const SERVER_ENTRIES_FILE: &str = "server-entries.toml";
pub const REPLAY_MOD_FILE: &str = "simple-rpc-replaymod.toml";

/// Modern GUI screen names fed by main-config sections.
const GUI_SECTIONS: &[(&str, &str)] = &[
    ("GuiScreenRealmsProxy", "realms_list"),
    ("GuiMultiplayer", "server_list"),
    ("GuiScreenWorking", "join_game"),
    ("GuiDownloadTerrain", "join_game"),
];

/// Modern GUI screen names fed by the Replay Mod file.
const REPLAY_SECTIONS: &[(&str, &str)] = &[
    ("GuiReplayViewer", "replay_viewer"),
    ("GuiReplayOverlay", "replay_editor"),
    ("GuiVideoRenderer", "replay_render"),
];

const LAUNCHER_FLAGS: &[&str] = &[
    "detectATLauncherInstance",
    "detectCurseManifest",
    "detectMCUpdaterInstance",
    "detectTechnicPack",
    "detectMultiMCManifest",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleRpcOutcome {
    Migrated {
        config_version: i64,
        server_entries_version: Option<i64>,
        replay_mod_version: Option<i64>,
    },
    /// Main file older than [`LOWEST_SUPPORTED`]; nothing was changed.
    Unsupported { found: i64 },
    /// Main file missing or not valid TOML; nothing was changed.
    Unreadable,
}

#[derive(Debug, Clone)]
pub struct SimpleRpcMigrator {
    file_version: i32,
    config_path: PathBuf,
    server_entries_path: Option<PathBuf>,
    replay_mod_path: Option<PathBuf>,
}

/// Looks up a dotted key inside nested tables.
fn lookup<'a>(table: &'a Table, path: &str) -> Option<&'a TomlValue> {
    let mut segments = path.split('.');
    let mut current = table.get(segments.next()?)?;
    for segment in segments {
        current = current.as_table()?.get(segment)?;
    }
    Some(current)
}

fn load_table(path: &Path) -> Result<Table> {
    let contents = fs::read_to_string(path)?;
    contents
        .parse::<Table>()
        .map_err(|e| PresenceError::Parse(format!("{}: {}", path.display(), e.message())))
}

fn to_json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value)
        .map_err(|e| debug!("Failed to serialize migrated value: {}", e))
        .ok()
}

impl SimpleRpcMigrator {
    pub fn new(
        file_version: i32,
        config_path: impl Into<PathBuf>,
        server_entries_path: Option<PathBuf>,
        replay_mod_path: Option<PathBuf>,
    ) -> Self {
        Self {
            file_version,
            config_path: config_path.into(),
            server_entries_path,
            replay_mod_path,
        }
    }

    /// Uses the three well-known file names inside `dir`.
    pub fn from_dir(file_version: i32, dir: &Path) -> Self {
        Self::new(
            file_version,
            dir.join(MAIN_FILE),
            Some(dir.join(SERVER_ENTRIES_FILE)),
            Some(dir.join(REPLAY_MOD_FILE)),
        )
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn migrate<C: ConfigAccess>(&self, config: &mut C) -> SimpleRpcOutcome {
        info!("{}", MESSAGES.migration.simple_rpc_found);
        let mut context = MigrationContext::new(self.file_version);

        let main = match load_table(&self.config_path) {
            Ok(table) => table,
            Err(e) => {
                error!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.simple_rpc_load_failed,
                        path = self.config_path.display(),
                        error = e
                    )
                );
                return SimpleRpcOutcome::Unreadable;
            }
        };

        let config_version = lookup(&main, "general.version")
            .and_then(TomlValue::as_integer)
            .unwrap_or(-1);
        context.channels.config = Some(config_version);
        debug!(
            "{}",
            msg_format!(
                MESSAGES.migration.simple_rpc_main_found,
                version = config_version,
                file_version = self.file_version
            )
        );
        if config_version < LOWEST_SUPPORTED {
            error!(
                "{}",
                msg_format!(
                    MESSAGES.migration.simple_rpc_outdated,
                    required = LOWEST_SUPPORTED,
                    found = config_version
                )
            );
            return SimpleRpcOutcome::Unsupported {
                found: config_version,
            };
        }

        self.migrate_main(config, &context, &main);
        save(config, &self.config_path);

        let server_entries_version = self
            .server_entries_path
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| self.migrate_server_entries(config, &mut context, path));

        let replay_mod_version = self
            .replay_mod_path
            .as_deref()
            .filter(|path| path.exists())
            .and_then(|path| self.migrate_replay_mod(config, &mut context, path));

        info!("{}", MESSAGES.migration.migration_complete);
        SimpleRpcOutcome::Migrated {
            config_version,
            server_entries_version,
            replay_mod_version,
        }
    }

    fn migrate_main<C: ConfigAccess>(&self, config: &mut C, context: &MigrationContext, main: &Table) {
        let client_id = lookup(main, "general.applicationID")
            .or_else(|| lookup(main, "general.clientID"))
            .and_then(|value| match value {
                TomlValue::String(s) => Some(s.clone()),
                TomlValue::Integer(i) => Some(i.to_string()),
                _ => None,
            });
        if let Some(client_id) = client_id {
            write(config, &["generalSettings", "clientId"], Value::String(client_id));
        }

        if let Some(debugging) = lookup(main, "general.debugging").and_then(TomlValue::as_bool) {
            write(config, &["advancedSettings", "debugMode"], Value::Bool(debugging));
        }

        if let Some(launcher) = lookup(main, "general.launcherIntegration").and_then(TomlValue::as_bool) {
            for &flag in LAUNCHER_FLAGS {
                write(config, &["generalSettings", flag], Value::Bool(launcher));
            }
        }

        let overrides_enabled = lookup(main, "dimension_overrides.enabled")
            .and_then(TomlValue::as_bool)
            .unwrap_or(false);
        for entry in tables(lookup(main, "dimension_overrides.dimensions")) {
            let Some(name) = entry.get("name").and_then(TomlValue::as_str) else {
                debug!("Skipping dimension override without a name");
                continue;
            };
            let (collection, key) = match name.strip_prefix("biome:") {
                Some(biome) => (["biomeSettings", "biomeData"], biome),
                None => (["dimensionSettings", "dimensionData"], name),
            };
            let data = ModuleData::with_data(context.convert(entry, overrides_enabled, true));
            if let Some(value) = to_json(&data) {
                write(config, &[collection[0], collection[1], key], value);
            }
        }

        for entry in tables(lookup(main, "custom.variables")) {
            let (Some(name), Some(value)) = (
                entry.get("name").and_then(TomlValue::as_str),
                entry.get("value").and_then(TomlValue::as_str),
            ) else {
                continue;
            };
            write(
                config,
                &["displaySettings", "dynamicVariables", name],
                Value::String(context.translate(value)),
            );
        }

        write(config, &["advancedSettings", "enablePerGui"], Value::Bool(true));
        for &(screen, section) in GUI_SECTIONS {
            if let Some(entry) = section_table(main, section) {
                let data = ModuleData::with_data(context.convert_section(entry, false));
                if let Some(value) = to_json(&data) {
                    write(config, &["advancedSettings", "guiSettings", "guiData", screen], value);
                }
            }
        }

        let status: [(&str, &[&str], Option<bool>); 4] = [
            ("init", &["statusMessages", "loadingData", "data"], None),
            ("main_menu", &["statusMessages", "mainMenuData", "data"], None),
            (
                "single_player",
                &["statusMessages", "singleplayerData", "data"],
                Some(!overrides_enabled),
            ),
            (
                "multi_player",
                &["serverSettings", "serverData", "default", "data"],
                Some(!overrides_enabled),
            ),
        ];
        for (section, path, enabled) in status {
            if let Some(entry) = section_table(main, section) {
                let data = match enabled {
                    Some(enabled) => context.convert(entry, enabled, false),
                    None => context.convert_section(entry, false),
                };
                if let Some(value) = to_json(&data) {
                    write(config, path, value);
                }
            }
        }

        if let Some(entry) = section_table(main, "generic") {
            if let Some(value) = to_json(&context.convert_section(entry, false)) {
                write(config, &["displaySettings", "presenceData"], value);
            }
        }
    }

    fn migrate_server_entries<C: ConfigAccess>(
        &self,
        config: &mut C,
        context: &mut MigrationContext,
        path: &Path,
    ) -> Option<i64> {
        let table = self.load_companion(path)?;
        let version = table.get("version").and_then(TomlValue::as_integer).unwrap_or(-1);
        context.channels.server_entries = Some(version);
        debug!(
            "{}",
            msg_format!(
                MESSAGES.migration.server_entries_found,
                version = version,
                file_version = self.file_version
            )
        );

        let overrides_enabled = table.get("enabled").and_then(TomlValue::as_bool).unwrap_or(false);
        for entry in tables(table.get("entry")) {
            let Some(ip) = entry.get("ip").and_then(TomlValue::as_str) else {
                debug!("Skipping server entry without an ip");
                continue;
            };
            let data = ModuleData::with_data(context.convert(entry, overrides_enabled, true));
            if let Some(value) = to_json(&data) {
                write(config, &["serverSettings", "serverData", ip], value);
            }
        }

        save(config, path);
        Some(version)
    }

    fn migrate_replay_mod<C: ConfigAccess>(
        &self,
        config: &mut C,
        context: &mut MigrationContext,
        path: &Path,
    ) -> Option<i64> {
        let table = self.load_companion(path)?;
        let version = lookup(&table, "general.version")
            .and_then(TomlValue::as_integer)
            .unwrap_or(-1);
        context.channels.replay_mod = Some(version);
        debug!(
            "{}",
            msg_format!(
                MESSAGES.migration.replay_mod_found,
                version = version,
                file_version = self.file_version
            )
        );

        write(config, &["advancedSettings", "enablePerGui"], Value::Bool(true));
        for &(screen, section) in REPLAY_SECTIONS {
            if let Some(entry) = section_table(&table, section) {
                let data = ModuleData::with_data(context.convert_section(entry, false));
                if let Some(value) = to_json(&data) {
                    write(config, &["advancedSettings", "guiSettings", "guiData", screen], value);
                }
            }
        }

        save(config, path);
        Some(version)
    }

    fn load_companion(&self, path: &Path) -> Option<Table> {
        load_table(path)
            .map_err(|e| {
                error!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.simple_rpc_load_failed,
                        path = path.display(),
                        error = e
                    )
                )
            })
            .ok()
    }
}

fn section_table<'a>(table: &'a Table, section: &str) -> Option<&'a Table> {
    let found = table.get(section).and_then(TomlValue::as_table);
    if found.is_none() {
        debug!(
            "{}",
            msg_format!(MESSAGES.migration.simple_rpc_section_missing, section = section)
        );
    }
    found
}

fn tables(value: Option<&TomlValue>) -> impl Iterator<Item = &Table> {
    value
        .and_then(TomlValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(TomlValue::as_table)
}

fn write<C: ConfigAccess>(config: &mut C, path: &[&str], value: Value) {
    if let Err(e) = config.set(path, value) {
        error!(
            "{}",
            msg_format!(
                MESSAGES.migration.property_write_failed,
                key = path.join("."),
                error = e
            )
        );
    }
}

fn save<C: ConfigAccess>(config: &mut C, source: &Path) {
    if let Err(e) = config.save() {
        error!(
            "{}",
            msg_format!(
                MESSAGES.migration.config_save_failed,
                path = source.display(),
                error = e
            )
        );
    }
}

impl<C: ConfigAccess> DataMigrator<C> for SimpleRpcMigrator {
    fn id(&self) -> &'static str {
        "simple-rpc"
    }

    fn description(&self) -> &'static str {
        "SimpleRPC TOML config to JSON config"
    }

    fn apply(&self, config: &mut C, _raw: Option<&Value>) -> Result<()> {
        self.migrate(config);
        Ok(())
    }
}
