//! Legacy `&TOKEN&` placeholder table and its translation pass.
//!
//! Rules run top to bottom against the running value. A rule whose token is a
//! longer form of another rule's token sits above it.

// External crates
use tracing::debug;

// Internal imports
use super::expressions::find_pipe_joins;
use super::rewriter::{replace_all, RewriteOptions};
use crate::schema::FieldKind;
use presence_core::msg_format;
use presence_messages::MESSAGES;

/// Restricts a rule to properties with a given legacy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameGuard {
    Any,
    /// Case-sensitive match on the camelCase legacy name.
    Exact(&'static str),
    AnyCase(&'static str),
}

impl NameGuard {
    pub fn allows(self, field_name: &str) -> bool {
        match self {
            NameGuard::Any => true,
            NameGuard::Exact(name) => field_name == name,
            NameGuard::AnyCase(name) => field_name.eq_ignore_ascii_case(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub token: &'static str,
    pub template: &'static str,
    pub kind: FieldKind,
    pub name: NameGuard,
}

impl RewriteRule {
    pub fn applies_to(&self, field_name: &str, kind: FieldKind) -> bool {
        self.kind == kind && self.name.allows(field_name)
    }
}

const fn text(token: &'static str, template: &'static str) -> RewriteRule {
    RewriteRule {
        token,
        template,
        kind: FieldKind::Text,
        name: NameGuard::Any,
    }
}

const fn icon(token: &'static str, template: &'static str) -> RewriteRule {
    RewriteRule {
        token,
        template,
        kind: FieldKind::Icon,
        name: NameGuard::Any,
    }
}

const fn text_in(token: &'static str, template: &'static str, name: NameGuard) -> RewriteRule {
    RewriteRule {
        token,
        template,
        kind: FieldKind::Text,
        name,
    }
}

const fn icon_in(token: &'static str, template: &'static str, name: NameGuard) -> RewriteRule {
    RewriteRule {
        token,
        template,
        kind: FieldKind::Icon,
        name,
    }
}

const DIMENSION_MODULE: NameGuard = NameGuard::Exact("dimensionMessages");
const BIOME_MODULE: NameGuard = NameGuard::Exact("biomeMessages");
const SERVER_MODULE: NameGuard = NameGuard::Exact("serverMessages");
const SCREEN_MODULE: NameGuard = NameGuard::Exact("guiMessages");
const ITEM_MODULE: NameGuard = NameGuard::Exact("itemMessages");
const TARGET_MODULE: NameGuard = NameGuard::Exact("entityTargetMessages");
const RIDING_MODULE: NameGuard = NameGuard::Exact("entityRidingMessages");

const OUTER_PLAYER: NameGuard = NameGuard::AnyCase("playerOuterInfoPlaceholder");
const INNER_PLAYER: NameGuard = NameGuard::AnyCase("playerInnerInfoPlaceholder");
const COORDINATES: NameGuard = NameGuard::AnyCase("playerCoordinatePlaceholder");
const HEALTH: NameGuard = NameGuard::AnyCase("playerHealthPlaceholder");
const PLAYER_LIST: NameGuard = NameGuard::AnyCase("playerListPlaceholder");
const WORLD_DATA: NameGuard = NameGuard::AnyCase("worldDataPlaceholder");
const ITEMS: NameGuard = NameGuard::AnyCase("playerItemsPlaceholder");
const MODS: NameGuard = NameGuard::AnyCase("modsPlaceholder");
const MODPACK: NameGuard = NameGuard::AnyCase("modpackMessage");

pub const LEGACY_RULES: &[RewriteRule] = &[
    icon("&DEFAULT&", "{general.icon}"),
    text("&MAINMENU&", "{menu.message}"),
    icon("&MAINMENU&", "{menu.icon}"),
    text("&BRAND&", "{general.brand}"),
    text("&MCVERSION&", "{general.version}"),
    // player
    text("&IGN&", "{custom.player_info_out}"),
    icon("&IGN&", "{player.icon}"),
    text("&IGN:NAME&", "{player.name}"),
    text_in("&NAME&", "{player.name}", OUTER_PLAYER),
    text("&IGN:UUID&", "{player.uuid.short}"),
    text_in("&UUID&", "{player.uuid.short}", OUTER_PLAYER),
    text("&IGN:UUID_FULL&", "{player.uuid.full}"),
    text_in("&UUID_FULL&", "{player.uuid.full}", OUTER_PLAYER),
    // mods
    text("&MODS&", "{custom.mods}"),
    text("&MODS:MODCOUNT&", "{general.mods}"),
    text_in("&MODCOUNT&", "{general.mods}", MODS),
    // pack
    text("&PACK&", "{custom.pack}"),
    icon("&PACK&", "{pack.icon}"),
    text("&PACK:NAME&", "{pack.name}"),
    text_in("&NAME&", "{pack.name}", MODPACK),
    // dimension
    text("&DIMENSION:DIMENSION&", "{dimension.name}"),
    text_in("&DIMENSION&", "{dimension.name}", DIMENSION_MODULE),
    text("&DIMENSION&", "{dimension.message}"),
    icon("&DIMENSION:ICON&", "{dimension.icon}"),
    icon_in("&ICON&", "{dimension.icon}", DIMENSION_MODULE),
    icon("&DIMENSION&", "{dimension.icon}"),
    // biome
    text("&BIOME:BIOME&", "{biome.name}"),
    text_in("&BIOME&", "{biome.name}", BIOME_MODULE),
    text("&BIOME&", "{biome.message}"),
    icon("&BIOME:ICON&", "{biome.icon}"),
    icon_in("&ICON&", "{biome.icon}", BIOME_MODULE),
    icon("&BIOME&", "{biome.icon}"),
    // server
    text("&SERVER:IP&", "{server.address.short}"),
    text_in("&IP&", "{server.address.short}", SERVER_MODULE),
    text("&SERVER:NAME&", "{server.name}"),
    text_in("&NAME&", "{server.name}", SERVER_MODULE),
    text("&SERVER:MOTD&", "{server.motd.raw}"),
    text_in("&MOTD&", "{server.motd.raw}", SERVER_MODULE),
    text("&SERVER&", "{server.message}"),
    icon("&SERVER:ICON&", "{server.icon}"),
    icon_in("&ICON&", "{server.icon}", SERVER_MODULE),
    icon("&SERVER&", "{server.icon}"),
    // server players and world info
    text("&SERVER:PLAYERS:CURRENT&", "{server.players.current}"),
    text_in("&PLAYERS:CURRENT&", "{server.players.current}", SERVER_MODULE),
    text_in("&CURRENT&", "{server.players.current}", PLAYER_LIST),
    text("&SERVER:PLAYERS:MAX&", "{server.players.max}"),
    text_in("&PLAYERS:MAX&", "{server.players.max}", SERVER_MODULE),
    text_in("&MAX&", "{server.players.max}", PLAYER_LIST),
    text("&SERVER:PLAYERS&", "{custom.players}"),
    text_in("&PLAYERS&", "{custom.players}", SERVER_MODULE),
    text("&SERVER:WORLDINFO:DIFFICULTY&", "{world.difficulty}"),
    text_in("&WORLDINFO:DIFFICULTY&", "{world.difficulty}", SERVER_MODULE),
    text_in("&DIFFICULTY&", "{world.difficulty}", WORLD_DATA),
    text("&SERVER:WORLDINFO:WORLDNAME&", "{world.name}"),
    text_in("&WORLDINFO:WORLDNAME&", "{world.name}", SERVER_MODULE),
    text_in("&WORLDNAME&", "{world.name}", WORLD_DATA),
    text("&SERVER:WORLDINFO:WORLDTIME12&", "{world.time12}"),
    text_in("&WORLDINFO:WORLDTIME12&", "{world.time12}", SERVER_MODULE),
    text_in("&WORLDTIME12&", "{world.time12}", WORLD_DATA),
    text("&SERVER:WORLDINFO:WORLDTIME&", "{world.time24}"),
    text_in("&WORLDINFO:WORLDTIME&", "{world.time24}", SERVER_MODULE),
    text_in("&WORLDTIME&", "{world.time24}", WORLD_DATA),
    text("&SERVER:WORLDINFO:WORLDDAY&", "{world.day}"),
    text_in("&WORLDINFO:WORLDDAY&", "{world.day}", SERVER_MODULE),
    text_in("&WORLDDAY&", "{world.day}", WORLD_DATA),
    text("&SERVER:WORLDINFO&", "{custom.world_info}"),
    text_in("&WORLDINFO&", "{custom.world_info}", SERVER_MODULE),
    // player coordinates, axis forms first
    text("&SERVER:PLAYERINFO:COORDS:xPosition&", "{player.position.x}"),
    text_in("&PLAYERINFO:COORDS:xPosition&", "{player.position.x}", SERVER_MODULE),
    text_in("&COORDS:xPosition&", "{player.position.x}", INNER_PLAYER),
    text_in("&xPosition&", "{player.position.x}", COORDINATES),
    text("&SERVER:PLAYERINFO:COORDS:yPosition&", "{player.position.y}"),
    text_in("&PLAYERINFO:COORDS:yPosition&", "{player.position.y}", SERVER_MODULE),
    text_in("&COORDS:yPosition&", "{player.position.y}", INNER_PLAYER),
    text_in("&yPosition&", "{player.position.y}", COORDINATES),
    text("&SERVER:PLAYERINFO:COORDS:zPosition&", "{player.position.z}"),
    text_in("&PLAYERINFO:COORDS:zPosition&", "{player.position.z}", SERVER_MODULE),
    text_in("&COORDS:zPosition&", "{player.position.z}", INNER_PLAYER),
    text_in("&zPosition&", "{player.position.z}", COORDINATES),
    text("&SERVER:PLAYERINFO:COORDS&", "{custom.player_info_coordinate}"),
    text_in("&PLAYERINFO:COORDS&", "{custom.player_info_coordinate}", SERVER_MODULE),
    text_in("&COORDS&", "{custom.player_info_coordinate}", INNER_PLAYER),
    // player health, current/max first
    text("&SERVER:PLAYERINFO:HEALTH:CURRENT&", "{player.health.current}"),
    text_in("&PLAYERINFO:HEALTH:CURRENT&", "{player.health.current}", SERVER_MODULE),
    text_in("&HEALTH:CURRENT&", "{player.health.current}", INNER_PLAYER),
    text_in("&CURRENT&", "{player.health.current}", HEALTH),
    text("&SERVER:PLAYERINFO:HEALTH:MAX&", "{player.health.max}"),
    text_in("&PLAYERINFO:HEALTH:MAX&", "{player.health.max}", SERVER_MODULE),
    text_in("&HEALTH:MAX&", "{player.health.max}", INNER_PLAYER),
    text_in("&MAX&", "{player.health.max}", HEALTH),
    text("&SERVER:PLAYERINFO:HEALTH&", "{custom.player_info_health}"),
    text_in("&PLAYERINFO:HEALTH&", "{custom.player_info_health}", SERVER_MODULE),
    text_in("&HEALTH&", "{custom.player_info_health}", INNER_PLAYER),
    text("&SERVER:PLAYERINFO&", "{custom.player_info_in}"),
    text_in("&PLAYERINFO&", "{custom.player_info_in}", SERVER_MODULE),
    // screens
    text("&SCREEN:SCREEN&", "{screen.name}"),
    text_in("&SCREEN&", "{screen.name}", SCREEN_MODULE),
    text("&SCREEN&", "{screen.message}"),
    icon("&SCREEN:ICON&", "{screen.icon}"),
    icon_in("&ICON&", "{screen.icon}", SCREEN_MODULE),
    icon("&SCREEN&", "{screen.icon}"),
    text("&SCREEN:CLASS&", "{data.screen.class}"),
    text_in("&CLASS&", "{data.screen.class}", SERVER_MODULE),
    // entities
    text("&TARGETENTITY:ENTITY&", "{entity.target.name}"),
    text_in("&ENTITY&", "{entity.target.name}", TARGET_MODULE),
    text("&TARGETENTITY&", "{entity.target.message}"),
    icon("&TARGETENTITY:ICON&", "{entity.target.icon}"),
    icon_in("&ICON&", "{entity.target.icon}", TARGET_MODULE),
    icon("&TARGETENTITY&", "{entity.target.icon}"),
    text("&RIDINGENTITY:ENTITY&", "{entity.riding.name}"),
    text_in("&ENTITY&", "{entity.riding.name}", RIDING_MODULE),
    text("&RIDINGENTITY&", "{entity.riding.message}"),
    icon("&RIDINGENTITY:ICON&", "{entity.riding.icon}"),
    icon_in("&ICON&", "{entity.riding.icon}", RIDING_MODULE),
    icon("&RIDINGENTITY&", "{entity.riding.icon}"),
    // held and worn items
    text("&TILEENTITY:MAIN&", "{item.main_hand.message}"),
    text_in("&MAIN&", "{item.main_hand.message}", ITEMS),
    text("&TILEENTITY:OFFHAND&", "{item.off_hand.message}"),
    text_in("&OFFHAND&", "{item.off_hand.message}", ITEMS),
    text("&TILEENTITY:HELMET&", "{item.helmet.message}"),
    text_in("&HELMET&", "{item.helmet.message}", ITEMS),
    text("&TILEENTITY:CHEST&", "{item.chestplate.message}"),
    text_in("&CHEST&", "{item.chestplate.message}", ITEMS),
    text("&TILEENTITY:LEGS&", "{item.leggings.message}"),
    text_in("&LEGS&", "{item.leggings.message}", ITEMS),
    text("&TILEENTITY:BOOTS&", "{item.boots.message}"),
    text_in("&BOOTS&", "{item.boots.message}", ITEMS),
    text("&TILEENTITY&", "{item.message.default}"),
    text_in("&ITEM&", "{item.message.holding}", ITEM_MODULE),
];

/// An ordered, read-only rule set.
#[derive(Debug, Clone, Copy)]
pub struct PatternTable {
    rules: &'static [RewriteRule],
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::legacy()
    }
}

impl PatternTable {
    pub const fn new(rules: &'static [RewriteRule]) -> Self {
        Self { rules }
    }

    pub const fn legacy() -> Self {
        Self::new(LEGACY_RULES)
    }

    pub fn rules(&self) -> &'static [RewriteRule] {
        self.rules
    }

    /// Rewrites legacy tokens in `value`, then folds `{a}|{b}` pairs into
    /// `{getOrDefault(a, b)}`.
    pub fn translate(&self, value: &str, field_name: &str, kind: FieldKind) -> String {
        let mut result = value.to_string();

        for rule in self.rules {
            if !rule.applies_to(field_name, kind) {
                continue;
            }
            if !result.to_lowercase().contains(&rule.token.to_lowercase()) {
                continue;
            }
            debug!(
                "{}",
                msg_format!(
                    MESSAGES.migration.statement_replaced,
                    name = field_name,
                    kind = kind.as_str(),
                    old = rule.token,
                    new = rule.template
                )
            );
            result = replace_all(&result, rule.token, rule.template, RewriteOptions::any_case());
        }

        fold_pipe_joins(&result, field_name, kind)
    }
}

fn fold_pipe_joins(value: &str, field_name: &str, kind: FieldKind) -> String {
    let mut result = value.to_string();
    for join in find_pipe_joins(value) {
        let replacement = join.to_expression();
        debug!(
            "{}",
            msg_format!(
                MESSAGES.migration.statement_replaced,
                name = field_name,
                kind = kind.as_str(),
                old = join.text,
                new = replacement
            )
        );
        result = result.replace(join.text, &replacement);
    }
    result
}
