//! Conversion of SimpleRPC presence sections into [`PresenceData`].

// External crates
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use toml::{Table, Value as TomlValue};

// Internal imports
use super::expressions::has_expression;
use super::rewriter::{rewrite, RewriteOptions};
use crate::elements::{Button, PresenceData};

pub const START_TIMESTAMP: &str = "{data.general.time}";

const SIMPLE_RPC_TOKENS: &[(&str, &str)] = &[
    ("%player%", "{player.name}"),
    ("%world%", "{dimension.name}"),
    ("%mods%", "{general.mods}"),
    ("%difficulty%", "{world.difficulty}"),
    ("%position%", "{custom.player_info_coordinate}"),
    ("%biome%", "{biome.name}"),
    ("%mcver%", "{general.version}"),
    ("%instance%", "{pack.name}"),
    ("%launcher%", "{general.brand}"),
    ("%server%", "{replace(server.address.short, '.', '_')}"),
    ("%launchername%", "{toLower(general.brand)}"),
    ("%savename%", "{world.name}"),
    ("%playerhead%", "{player.icon}"),
    ("%gametime12%", "{world.time.format_12}"),
    ("%gametime%", "{world.time.format_24}"),
    ("%day%", "{world.day}"),
    ("%weather%", "{world.weather.name}"),
    ("%replayframe%", "{replaymod.frames.current}"),
    ("%replaytotal%", "{replaymod.frames.total}"),
    ("%replaytime%", "{replaymod.time.current}"),
    ("%replaytimeleft%", "{replaymod.time.remaining}"),
    ("%serverip%", "{server.address.short}"),
    ("%servername%", "{server.name}"),
    ("%players%", "{server.players.current}"),
    ("%playersexcl%", "{server.players.current - 1}"),
    ("%maxplayers%", "{server.players.max}"),
    ("%motd%", "{server.motd.raw}"),
    ("%servericon%", "{server.icon}"),
    ("%realmname%", "{server.name}"),
    ("%realmdescription%", "{server.motd.raw}"),
    ("%realmgame%", "{server.minigame}"),
    ("%realmicon%", "{server.icon}"),
];

/// `%token%` replacements, longest token first.
pub static SIMPLE_RPC_PLACEHOLDERS: Lazy<IndexMap<String, String>> = Lazy::new(|| {
    let mut tokens: Vec<(&str, &str)> = SIMPLE_RPC_TOKENS.to_vec();
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    tokens
        .into_iter()
        .map(|(old, new)| (old.to_string(), new.to_string()))
        .collect()
});

const PLACEHOLDER_OPTIONS: RewriteOptions = RewriteOptions::new(false, false, true);

/// Behaviour switches tied to the versions of the SimpleRPC files being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFlag {
    /// Icon keys may list several candidates picked at random.
    UseImagePools,
}

impl ConfigFlag {
    /// Minimum (main config, server entries, replay mod) versions.
    pub const fn thresholds(self) -> (i64, i64, i64) {
        match self {
            ConfigFlag::UseImagePools => (17, 2, 1),
        }
    }
}

/// File versions seen so far in one run. `None` means that file has not been read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionChannels {
    pub config: Option<i64>,
    pub server_entries: Option<i64>,
    pub replay_mod: Option<i64>,
}

impl VersionChannels {
    pub fn is_active(&self, flag: ConfigFlag) -> bool {
        let (config, server_entries, replay_mod) = flag.thresholds();
        let meets = |channel: Option<i64>, threshold: i64| channel.map_or(true, |v| v >= threshold);

        meets(self.config, config)
            && meets(self.server_entries, server_entries)
            && meets(self.replay_mod, replay_mod)
    }
}

/// Per-run state shared by every presence conversion.
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    pub file_version: i32,
    pub channels: VersionChannels,
}

impl MigrationContext {
    pub fn new(file_version: i32) -> Self {
        Self {
            file_version,
            channels: VersionChannels::default(),
        }
    }

    pub fn is_active(&self, flag: ConfigFlag) -> bool {
        self.channels.is_active(flag)
    }

    /// Rewrites `%token%` placeholders into expressions.
    pub fn translate(&self, value: &str) -> String {
        translate_placeholders(value)
    }

    /// Folds icon candidates into one expression.
    ///
    /// One candidate stays as-is. Several become `{randomString(...)}` where a
    /// candidate holding an expression is wrapped in `getResult(...)` and a
    /// literal candidate is quoted.
    pub fn combine_candidates(&self, candidates: &[&str]) -> String {
        match candidates {
            [] => String::new(),
            [single] => self.translate(single),
            many => {
                let items: Vec<String> = many
                    .iter()
                    .map(|candidate| {
                        let translated = self.translate(candidate);
                        if has_expression(&translated) {
                            format!("getResult({})", translated)
                        } else {
                            format!("'{}'", translated)
                        }
                    })
                    .collect();
                format!("{{randomString({})}}", items.join(","))
            }
        }
    }

    fn icon_field(&self, value: Option<&TomlValue>) -> String {
        let candidates = candidates(value);
        if self.is_active(ConfigFlag::UseImagePools) {
            self.combine_candidates(&candidates)
        } else {
            candidates
                .first()
                .map(|candidate| self.translate(candidate))
                .unwrap_or_default()
        }
    }

    fn text_field(&self, entry: &Table, key: &str) -> String {
        entry
            .get(key)
            .and_then(scalar_text)
            .map(|value| self.translate(&value))
            .unwrap_or_default()
    }

    /// Builds presence data from one legacy section.
    pub fn convert(&self, entry: &Table, enabled: bool, use_as_main: bool) -> PresenceData {
        let mut data = PresenceData::blank();
        data.enabled = enabled;
        data.use_as_main = use_as_main;
        data.details = self.text_field(entry, "description");
        data.game_state = self.text_field(entry, "state");
        data.large_image_key = self.icon_field(entry.get("largeImageKey"));
        data.small_image_key = self.icon_field(entry.get("smallImageKey"));
        data.large_image_text = self.text_field(entry, "largeImageText");
        data.small_image_text = self.text_field(entry, "smallImageText");
        data.start_timestamp = START_TIMESTAMP.to_string();

        let buttons = entry
            .get("buttons")
            .and_then(TomlValue::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (index, button) in buttons.iter().filter_map(TomlValue::as_table).enumerate() {
            data.add_button(
                format!("button_{}", index + 1),
                Button::new(self.text_field(button, "label"), self.text_field(button, "url")),
            );
        }
        data
    }

    /// Like [`Self::convert`], with `enabled` read from the section (default true).
    pub fn convert_section(&self, entry: &Table, use_as_main: bool) -> PresenceData {
        let enabled = entry
            .get("enabled")
            .and_then(TomlValue::as_bool)
            .unwrap_or(true);
        self.convert(entry, enabled, use_as_main)
    }
}

pub fn translate_placeholders(value: &str) -> String {
    rewrite(value, &SIMPLE_RPC_PLACEHOLDERS, PLACEHOLDER_OPTIONS)
}

fn scalar_text(value: &TomlValue) -> Option<String> {
    match value {
        TomlValue::String(s) => Some(s.clone()),
        TomlValue::Integer(i) => Some(i.to_string()),
        TomlValue::Float(f) => Some(f.to_string()),
        TomlValue::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

fn candidates(value: Option<&TomlValue>) -> Vec<&str> {
    match value {
        Some(TomlValue::String(s)) => vec![s.as_str()],
        Some(TomlValue::Array(items)) => items.iter().filter_map(TomlValue::as_str).collect(),
        _ => Vec::new(),
    }
}
