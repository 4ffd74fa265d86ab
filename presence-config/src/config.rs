//! Typed modern configuration schema.
//!
//! The migration engine never touches these structs directly; it reads and writes
//! through [`crate::access::ConfigAccess`]. The structs define the shape, the
//! defaults, and the type check every write goes through.

// External crate imports
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// Internal imports
use crate::elements::{ModuleData, PresenceData};

/// Latest structural generation of the config file.
pub const SCHEMA_VERSION: i32 = 6;

fn module_map(default_text: &str) -> IndexMap<String, ModuleData> {
    let mut map = IndexMap::new();
    map.insert("default".to_string(), ModuleData::text(default_text));
    map
}

fn string_map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "_schemaVersion")]
    pub schema_version: i32,
    #[serde(rename = "_lastMCVersionId")]
    pub last_mc_version_id: i32,
    #[serde(rename = "generalSettings")]
    pub general_settings: General,
    #[serde(rename = "biomeSettings")]
    pub biome_settings: Biome,
    #[serde(rename = "dimensionSettings")]
    pub dimension_settings: Dimension,
    #[serde(rename = "serverSettings")]
    pub server_settings: Server,
    #[serde(rename = "statusMessages")]
    pub status_messages: Status,
    #[serde(rename = "advancedSettings")]
    pub advanced_settings: Advanced,
    #[serde(rename = "accessibilitySettings")]
    pub accessibility_settings: Accessibility,
    #[serde(rename = "displaySettings")]
    pub display_settings: Display,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            last_mc_version_id: 0,
            general_settings: General::default(),
            biome_settings: Biome::default(),
            dimension_settings: Dimension::default(),
            server_settings: Server::default(),
            status_messages: Status::default(),
            advanced_settings: Advanced::default(),
            accessibility_settings: Accessibility::default(),
            display_settings: Display::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct General {
    #[serde(rename = "detectATLauncherInstance")]
    pub detect_at_launcher_instance: bool,
    pub detect_curse_manifest: bool,
    #[serde(rename = "detectMultiMCManifest")]
    pub detect_multi_mc_manifest: bool,
    #[serde(rename = "detectMCUpdaterInstance")]
    pub detect_mc_updater_instance: bool,
    pub detect_technic_pack: bool,
    pub detect_modrinth_pack: bool,
    pub detect_biome_data: bool,
    pub detect_dimension_data: bool,
    pub detect_world_data: bool,
    pub client_id: String,
    pub default_icon: String,
    pub enable_join_requests: bool,
    pub party_privacy_level: i32,
    pub preferred_client_level: i32,
    pub reset_time_on_init: bool,
    pub auto_register: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            detect_at_launcher_instance: true,
            detect_curse_manifest: true,
            detect_multi_mc_manifest: true,
            detect_mc_updater_instance: true,
            detect_technic_pack: true,
            detect_modrinth_pack: true,
            detect_biome_data: true,
            detect_dimension_data: true,
            detect_world_data: true,
            client_id: "450485984333660181".to_string(),
            default_icon: "grass".to_string(),
            enable_join_requests: false,
            party_privacy_level: 0,
            preferred_client_level: 0,
            reset_time_on_init: false,
            auto_register: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Biome {
    pub fallback_biome_icon: String,
    pub biome_data: IndexMap<String, ModuleData>,
}

impl Default for Biome {
    fn default() -> Self {
        Self {
            fallback_biome_icon: "unknown".to_string(),
            biome_data: module_map("Playing in {biome.name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimension {
    pub fallback_dimension_icon: String,
    pub dimension_data: IndexMap<String, ModuleData>,
}

impl Default for Dimension {
    fn default() -> Self {
        Self {
            fallback_dimension_icon: "unknown".to_string(),
            dimension_data: module_map("In the {dimension.name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Server {
    pub fallback_server_icon: String,
    pub fallback_server_name: String,
    pub fallback_server_motd: String,
    pub server_data: IndexMap<String, ModuleData>,
    pub ping_rate_interval: i32,
    pub ping_rate_unit: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            fallback_server_icon: "default".to_string(),
            fallback_server_name: "Minecraft Server".to_string(),
            fallback_server_motd: "A Minecraft Server".to_string(),
            server_data: module_map("Playing on {server.name}"),
            ping_rate_interval: 5,
            ping_rate_unit: "minutes".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Status {
    pub main_menu_data: ModuleData,
    pub loading_data: ModuleData,
    pub lan_data: ModuleData,
    pub singleplayer_data: ModuleData,
    pub realm_data: ModuleData,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            main_menu_data: ModuleData::text("In the Main Menu"),
            loading_data: ModuleData::text("Loading..."),
            lan_data: ModuleData::text("Playing on a LAN Server"),
            singleplayer_data: ModuleData::text("Playing Singleplayer"),
            realm_data: ModuleData::text("Playing on Realms"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuiSettings {
    pub fallback_gui_icon: String,
    pub gui_data: IndexMap<String, ModuleData>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            fallback_gui_icon: "unknown".to_string(),
            gui_data: module_map("In {screen.name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitySettings {
    pub fallback_entity_icon: String,
    pub target_data: IndexMap<String, ModuleData>,
    pub riding_data: IndexMap<String, ModuleData>,
}

impl Default for EntitySettings {
    fn default() -> Self {
        Self {
            fallback_entity_icon: "unknown".to_string(),
            target_data: module_map("Targeting {entity.target.name}"),
            riding_data: module_map("Riding {entity.riding.name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Advanced {
    pub enable_commands: bool,
    pub enable_per_gui: bool,
    pub enable_per_item: bool,
    pub enable_per_entity: bool,
    pub format_words: bool,
    pub debug_mode: bool,
    pub verbose_mode: bool,
    pub refresh_rate: i32,
    pub round_size: i32,
    pub include_extra_gui_classes: bool,
    pub allow_placeholder_previews: bool,
    pub allow_placeholder_operators: bool,
    pub gui_settings: GuiSettings,
    pub item_messages: IndexMap<String, String>,
    pub entity_settings: EntitySettings,
    pub allow_endpoint_icons: bool,
    pub server_icon_endpoint: String,
    pub player_skin_endpoint: String,
    pub allow_duplicate_packets: bool,
    pub max_connection_attempts: i32,
}

impl Default for Advanced {
    fn default() -> Self {
        Self {
            enable_commands: true,
            enable_per_gui: false,
            enable_per_item: false,
            enable_per_entity: false,
            format_words: true,
            debug_mode: false,
            verbose_mode: false,
            refresh_rate: 2,
            round_size: 3,
            include_extra_gui_classes: false,
            allow_placeholder_previews: false,
            allow_placeholder_operators: true,
            gui_settings: GuiSettings::default(),
            item_messages: string_map(&[("default", "Holding {item.message.holding}")]),
            entity_settings: EntitySettings::default(),
            allow_endpoint_icons: true,
            server_icon_endpoint: "https://api.mcsrvstat.us/icon/{server.address.short}"
                .to_string(),
            player_skin_endpoint:
                "https://mc-heads.net/avatar/{getOrDefault(player.uuid.full, player.name)}"
                    .to_string(),
            allow_duplicate_packets: false,
            max_connection_attempts: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accessibility {
    pub language_id: String,
    pub strip_translation_colors: bool,
    pub strip_translation_formatting: bool,
    pub strip_extra_gui_elements: bool,
    pub show_logging_in_chat: bool,
    pub render_tooltips: bool,
    pub config_key_code: i32,
}

impl Default for Accessibility {
    fn default() -> Self {
        Self {
            language_id: "en_us".to_string(),
            strip_translation_colors: false,
            strip_translation_formatting: false,
            strip_extra_gui_elements: false,
            show_logging_in_chat: false,
            render_tooltips: true,
            config_key_code: 96,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Display {
    pub presence_data: PresenceData,
    pub dynamic_icons: IndexMap<String, String>,
    pub dynamic_variables: IndexMap<String, String>,
}

impl Default for Display {
    fn default() -> Self {
        let presence_data = PresenceData {
            game_state: "{getOrDefault(server.message)} {getOrDefault(pack.name)}".to_string(),
            details: "{getFirst(menu.message, dimension.message)}".to_string(),
            large_image_key: "{getFirst(menu.icon, dimension.icon)}".to_string(),
            large_image_text: "{getFirst(menu.message, dimension.message)}".to_string(),
            small_image_key: "{getFirst(server.icon, pack.icon)}".to_string(),
            small_image_text: "{getOrDefault(server.message)} {getOrDefault(pack.name)}"
                .to_string(),
            start_timestamp: "{data.general.time}".to_string(),
            ..Default::default()
        };

        Self {
            presence_data,
            dynamic_icons: string_map(&[("default", "https://placehold.co/256.png")]),
            dynamic_variables: string_map(&[
                ("default", "Example Text"),
                ("pack", "in {pack.name}"),
                ("players", "{server.players.current} / {server.players.max} Players"),
                ("player_info_out", "{player.name}"),
                ("player_info_in", "{custom.player_info_coordinate}"),
                (
                    "player_info_coordinate",
                    "{player.position.x}, {player.position.y}, {player.position.z}",
                ),
                (
                    "player_info_health",
                    "{player.health.current} / {player.health.max}",
                ),
                ("player_info_items", "{item.main_hand.message}"),
                ("world_info", "{world.difficulty}, {world.name}"),
                ("mods", "{general.mods} Mods"),
            ]),
        }
    }
}
