//! Migration of v1 `craftpresence.properties` files into the JSON tree.

// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

// Internal imports
use super::patterns::PatternTable;
use super::DataMigrator;
use crate::access::{split_path, ConfigAccess};
use crate::config::SCHEMA_VERSION;
use crate::properties::Properties;
use crate::schema::{FieldKind, RecordShape, ValueKind};
use presence_core::error::Result;
use presence_core::msg_format;
use presence_messages::MESSAGES;

pub const DEFAULT_SPLIT_CHARACTER: &str = ";";

/// Legacy camelCase names and the modern path each one moved to.
const NAME_TABLE: &[(&str, &str)] = &[
    ("lastMcVersionId", "_lastMCVersionId"),
    // general
    ("detectCurseManifest", "generalSettings.detectCurseManifest"),
    ("detectMultimcInstance", "generalSettings.detectMultiMCManifest"),
    ("detectMcupdaterInstance", "generalSettings.detectMCUpdaterInstance"),
    ("detectTechnicPack", "generalSettings.detectTechnicPack"),
    ("showElapsedTime", "generalSettings.showTime"),
    ("detectBiomeData", "generalSettings.detectBiomeData"),
    ("detectDimensionData", "generalSettings.detectDimensionData"),
    ("detectWorldData", "generalSettings.detectWorldData"),
    ("clientId", "generalSettings.clientId"),
    ("defaultIcon", "generalSettings.defaultIcon"),
    ("enableJoinRequests", "generalSettings.enableJoinRequests"),
    ("partyPrivacy", "generalSettings.partyPrivacyLevel"),
    ("preferredClient", "generalSettings.preferredClientLevel"),
    ("resetTimeOnInit", "generalSettings.resetTimeOnInit"),
    ("autoRegister", "generalSettings.autoRegister"),
    // biomes, dimensions, servers
    ("defaultBiomeIcon", "biomeSettings.fallbackBiomeIcon"),
    ("biomeMessages", "biomeSettings.biomeData"),
    ("defaultDimensionIcon", "dimensionSettings.fallbackDimensionIcon"),
    ("dimensionMessages", "dimensionSettings.dimensionData"),
    ("defaultServerIcon", "serverSettings.fallbackServerIcon"),
    ("defaultServerName", "serverSettings.fallbackServerName"),
    ("defaultServerMotd", "serverSettings.fallbackServerMotd"),
    ("serverMessages", "serverSettings.serverData"),
    // status messages
    ("mainMenuMessage", "statusMessages.mainMenuData.textOverride"),
    ("loadingMessage", "statusMessages.loadingData.textOverride"),
    ("lanGameMessage", "statusMessages.lanData.textOverride"),
    ("singleplayerGameMessage", "statusMessages.singleplayerData.textOverride"),
    // placeholder messages became dynamic variables
    ("modpackMessage", "displaySettings.dynamicVariables.pack"),
    ("playerOuterInfoPlaceholder", "displaySettings.dynamicVariables.player_info_out"),
    ("playerInnerInfoPlaceholder", "displaySettings.dynamicVariables.player_info_in"),
    ("playerCoordinatePlaceholder", "displaySettings.dynamicVariables.player_info_coordinate"),
    ("playerHealthPlaceholder", "displaySettings.dynamicVariables.player_info_health"),
    ("playerListPlaceholder", "displaySettings.dynamicVariables.players"),
    ("playerItemsPlaceholder", "displaySettings.dynamicVariables.player_info_items"),
    ("worldDataPlaceholder", "displaySettings.dynamicVariables.world_info"),
    ("modsPlaceholder", "displaySettings.dynamicVariables.mods"),
    // advanced
    ("enableCommands", "advancedSettings.enableCommands"),
    ("enablePerGuiSystem", "advancedSettings.enablePerGui"),
    ("enablePerItemSystem", "advancedSettings.enablePerItem"),
    ("enablePerEntitySystem", "advancedSettings.enablePerEntity"),
    ("renderTooltips", "accessibilitySettings.renderTooltips"),
    ("formatWords", "advancedSettings.formatWords"),
    ("debugMode", "advancedSettings.debugMode"),
    ("verboseMode", "advancedSettings.verboseMode"),
    ("refreshRate", "advancedSettings.refreshRate"),
    ("roundingSize", "advancedSettings.roundSize"),
    ("includeExtraGuiClasses", "advancedSettings.includeExtraGuiClasses"),
    ("allowPlaceholderPreviews", "advancedSettings.allowPlaceholderPreviews"),
    ("allowPlaceholderOperators", "advancedSettings.allowPlaceholderOperators"),
    ("guiMessages", "advancedSettings.guiSettings.guiData"),
    ("itemMessages", "advancedSettings.itemMessages"),
    ("entityTargetMessages", "advancedSettings.entitySettings.targetData"),
    ("entityRidingMessages", "advancedSettings.entitySettings.ridingData"),
    ("playerSkinEndpoint", "advancedSettings.playerSkinEndpoint"),
    // accessibility
    ("languageId", "accessibilitySettings.languageId"),
    ("reducedBackgroundTint", "accessibilitySettings.showBackgroundAsDark"),
    ("stripTranslationColors", "accessibilitySettings.stripTranslationColors"),
    ("showLoggingInChat", "accessibilitySettings.showLoggingInChat"),
    ("stripExtraGuiElements", "accessibilitySettings.stripExtraGuiElements"),
    ("configGuiKeybind", "accessibilitySettings.configKeyCode"),
    // display
    ("gameStateMessageFormat", "displaySettings.presenceData.gameState"),
    ("detailsMessageFormat", "displaySettings.presenceData.details"),
    ("largeImageTextFormat", "displaySettings.presenceData.largeImageText"),
    ("smallImageTextFormat", "displaySettings.presenceData.smallImageText"),
    ("largeImageKeyFormat", "displaySettings.presenceData.largeImageKey"),
    ("smallImageKeyFormat", "displaySettings.presenceData.smallImageKey"),
    ("extraButtonMessages", "displaySettings.presenceData.buttons"),
    ("dynamicIcons", "displaySettings.dynamicIcons"),
];

static LEGACY_NAMES: Lazy<IndexMap<&'static str, &'static str>> =
    Lazy::new(|| NAME_TABLE.iter().copied().collect());

/// Legacy settings that are never migrated.
pub const EXCLUDED_KEYS: &[&str] = &[
    "schemaVersion",
    "splitCharacter",
    "guiBackgroundColor",
    "buttonBackgroundColor",
    "tooltipBackgroundColor",
    "tooltipBorderColor",
];

/// Modern dotted path for a camelCase legacy name. Unknown names keep their spelling.
pub fn modern_path(legacy_name: &str) -> &str {
    LEGACY_NAMES.get(legacy_name).copied().unwrap_or(legacy_name)
}

/// `DETECT_CURSE_MANIFEST` / `detect curse-manifest` -> `detectCurseManifest`.
pub fn format_to_camel(original: &str) -> String {
    original
        .split(|c: char| !(c.is_ascii_alphanumeric()))
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                return word.to_lowercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Splits a `[a;b, c;d]` array encoding into its entries. Anything else is `None`.
fn split_array(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return None;
    }

    let inner: String = trimmed.chars().filter(|c| *c != '[' && *c != ']').collect();
    let entries = if inner.contains(", ") {
        inner.split(", ").map(str::to_string).collect()
    } else if inner.contains(',') {
        inner.split(',').map(str::to_string).collect()
    } else {
        vec![inner]
    };
    Some(entries)
}

/// Splits one array entry into positional fields, dropping trailing empty fields.
fn split_fields<'a>(entry: &'a str, split_character: &str) -> Vec<&'a str> {
    let mut parts: Vec<&str> = if split_character.is_empty() {
        vec![entry]
    } else {
        entry.split(split_character).collect()
    };
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

/// What one legacy migration run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyReport {
    pub loaded: bool,
    pub migrated: Vec<String>,
    pub deleted: bool,
}

#[derive(Debug, Clone)]
pub struct LegacyMigrator {
    path: PathBuf,
    encoding: String,
    table: PatternTable,
}

impl LegacyMigrator {
    pub fn new(path: impl Into<PathBuf>, encoding: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            encoding: encoding.into(),
            table: PatternTable::legacy(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves every customized legacy value into `config`, deletes the legacy
    /// file, stamps the current schema version and saves.
    pub fn migrate<C: ConfigAccess>(&self, config: &mut C) -> LegacyReport {
        let mut report = LegacyReport::default();
        info!(
            "{}",
            msg_format!(MESSAGES.migration.legacy_found, path = self.path.display())
        );

        let properties = match Properties::load(&self.path, &self.encoding) {
            Ok(properties) => {
                report.loaded = true;
                properties
            }
            Err(e) => {
                error!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.legacy_load_failed,
                        path = self.path.display(),
                        error = e
                    )
                );
                Properties::new()
            }
        };

        let split_character = properties
            .iter()
            .find(|(key, _)| format_to_camel(key) == "splitCharacter")
            .map(|(_, value)| value)
            .unwrap_or(DEFAULT_SPLIT_CHARACTER);
        for (key, raw) in properties.iter() {
            let name = format_to_camel(key);
            if EXCLUDED_KEYS.contains(&name.as_str()) {
                continue;
            }
            if let Some(path) = self.migrate_property(config, &name, raw, split_character) {
                report.migrated.push(path);
            }
        }

        match fs::remove_file(&self.path) {
            Ok(()) => report.deleted = true,
            Err(e) => error!(
                "{}",
                msg_format!(
                    MESSAGES.migration.legacy_delete_failed,
                    path = self.path.display(),
                    error = e
                )
            ),
        }

        let version_path = ["_schemaVersion"];
        let latest = Value::from(SCHEMA_VERSION);
        if config.get(&version_path).as_ref() != Some(&latest) {
            if let Err(e) = config.set(&version_path, latest) {
                error!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.property_write_failed,
                        key = "_schemaVersion",
                        error = e
                    )
                );
            }
        }

        if let Err(e) = config.save() {
            error!(
                "{}",
                msg_format!(
                    MESSAGES.migration.config_save_failed,
                    path = self.path.display(),
                    error = e
                )
            );
        }
        report
    }

    /// Returns the modern path when a value was written.
    fn migrate_property<C: ConfigAccess>(
        &self,
        config: &mut C,
        name: &str,
        raw: &str,
        split_character: &str,
    ) -> Option<String> {
        let dotted = modern_path(name);
        let path = split_path(dotted);
        let live = config.get(&path);
        let Some(reference) = live.clone().or_else(|| config.default_at(&path)) else {
            debug!("Skipping legacy property {} (no modern property {})", name, dotted);
            return None;
        };

        let kind = match ValueKind::of(&reference) {
            ValueKind::Record => config
                .default_at(&path)
                .map(|default| ValueKind::of(&default))
                .filter(|kind| matches!(kind, ValueKind::Collection(_)))
                .unwrap_or(ValueKind::Record),
            kind => kind,
        };

        let converted = self.convert(kind, name, raw, split_character)?;
        if live.as_ref() == Some(&converted) {
            return None;
        }

        debug!(
            "{}",
            msg_format!(MESSAGES.migration.legacy_property_migrated, name = name, path = dotted)
        );
        let old = live.unwrap_or(Value::Null);
        debug!(
            "{}",
            msg_format!(
                MESSAGES.migration.property_modified,
                key = dotted,
                old = old,
                new = converted
            )
        );

        match config.set(&path, converted.clone()) {
            Ok(()) => Some(dotted.to_string()),
            Err(e) => {
                debug!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.legacy_value_rejected,
                        path = dotted,
                        value = converted,
                        error = e
                    )
                );
                None
            }
        }
    }

    /// Type-directed conversion; `None` leaves the modern value untouched.
    fn convert(&self, kind: ValueKind, name: &str, raw: &str, split_character: &str) -> Option<Value> {
        match kind {
            ValueKind::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Some(Value::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Some(Value::Bool(false))
                } else {
                    None
                }
            }
            ValueKind::Integer => raw.parse::<i32>().ok().map(Value::from),
            ValueKind::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ValueKind::Text => Some(Value::String(self.table.translate(
                raw,
                name,
                FieldKind::for_property(name),
            ))),
            ValueKind::Collection(shape) => self.convert_collection(shape, name, raw, split_character),
            ValueKind::Record | ValueKind::List | ValueKind::Null => None,
        }
    }

    fn convert_collection(
        &self,
        shape: RecordShape,
        name: &str,
        raw: &str,
        split_character: &str,
    ) -> Option<Value> {
        let entries = split_array(raw)?;
        let mut collection = Map::new();

        for entry in entries.iter().filter(|entry| !entry.is_empty()) {
            let parts = split_fields(entry, split_character);
            let Some((key, fields)) = parts.split_first() else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let record = shape.build(fields, |value, kind| self.table.translate(value, name, kind));
            collection.insert(key.to_string(), record);
        }
        Some(Value::Object(collection))
    }
}

impl<C: ConfigAccess> DataMigrator<C> for LegacyMigrator {
    fn id(&self) -> &'static str {
        "legacy-properties"
    }

    fn description(&self) -> &'static str {
        "v1 properties file to JSON config"
    }

    fn apply(&self, config: &mut C, _raw: Option<&Value>) -> Result<()> {
        self.migrate(config);
        Ok(())
    }
}
