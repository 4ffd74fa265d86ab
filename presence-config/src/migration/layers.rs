//! Step-by-step upgrades of an existing JSON config to the current schema.

// External crates
use serde_json::Value;
use tracing::{debug, error, info};

// Internal imports
use super::presence::START_TIMESTAMP;
use super::text_replacer::TextReplacer;
use crate::access::ConfigAccess;
use crate::config::SCHEMA_VERSION;
use presence_core::msg_format;
use presence_messages::MESSAGES;

type Layer<C> = fn(&mut C, Option<&Value>);

/// `(target version, upgrade)`; each upgrade runs when the source is older
/// than its target.
fn layers<C: ConfigAccess>() -> [(i32, Layer<C>); 5] {
    [
        (2, start_timestamp_layer::<C> as Layer<C>),
        (3, world_time_layer::<C> as Layer<C>),
        (4, version_only_layer::<C> as Layer<C>),
        (5, screen_class_layer::<C> as Layer<C>),
        (6, version_only_layer::<C> as Layer<C>),
    ]
}

/// Upgrades `config` from `from` to [`SCHEMA_VERSION`], stamps the new
/// version and saves. Returns the version the tree ends on.
pub fn upgrade_schema<C: ConfigAccess>(config: &mut C, raw: Option<&Value>, from: i32) -> i32 {
    for (target, layer) in layers::<C>() {
        if from < target {
            debug!(
                "{}",
                msg_format!(MESSAGES.migration.schema_layer, from = target - 1, to = target)
            );
            layer(config, raw);
        }
    }

    if let Err(e) = config.set(&["_schemaVersion"], Value::from(SCHEMA_VERSION)) {
        error!(
            "{}",
            msg_format!(
                MESSAGES.migration.property_write_failed,
                key = "_schemaVersion",
                error = e
            )
        );
    }
    if let Err(e) = config.save() {
        error!(
            "{}",
            msg_format!(MESSAGES.migration.config_save_failed, path = "config", error = e)
        );
    }
    info!("{}", MESSAGES.migration.migration_complete);
    SCHEMA_VERSION
}

fn start_timestamp_layer<C: ConfigAccess>(config: &mut C, raw: Option<&Value>) {
    let show_time = raw
        .and_then(|raw| raw.pointer("/generalSettings/showTime"))
        .and_then(Value::as_bool);
    let Some(show_time) = show_time else {
        return;
    };

    let timestamp = if show_time { START_TIMESTAMP } else { "" };
    let path = ["displaySettings", "presenceData", "startTimestamp"];
    if let Err(e) = config.set(&path, Value::from(timestamp)) {
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

fn world_time_layer<C: ConfigAccess>(config: &mut C, raw: Option<&Value>) {
    let replacer = TextReplacer::placeholders([
        ("world.time24", "world.time.format_24"),
        ("world.time12", "world.time.format_12"),
        ("world.day", "world.time.day"),
    ]);
    run_replacer(config, raw, &replacer);
}

fn screen_class_layer<C: ConfigAccess>(config: &mut C, raw: Option<&Value>) {
    let replacer =
        TextReplacer::placeholders([("data.screen.class", "getClass(data.screen.instance)")]);
    run_replacer(config, raw, &replacer);
}

fn version_only_layer<C: ConfigAccess>(_config: &mut C, _raw: Option<&Value>) {}

fn run_replacer<C: ConfigAccess>(config: &mut C, raw: Option<&Value>, replacer: &TextReplacer) {
    let modified = match raw {
        Some(raw) => replacer.apply(config, raw),
        None => {
            let snapshot = config.get(&[]).unwrap_or(Value::Null);
            replacer.apply(config, &snapshot)
        }
    };
    debug!("Schema layer rewrote {} properties", modified);
}
