//! Migration engine messages (legacy properties, SimpleRPC, text replacement, schema layers)

pub struct MigrationMessages {
    // ============================================================================
    // Legacy properties migration
    // ============================================================================
    pub legacy_found: &'static str,
    pub legacy_load_failed: &'static str,
    pub legacy_delete_failed: &'static str,
    pub legacy_property_migrated: &'static str,
    pub legacy_value_rejected: &'static str,

    // ============================================================================
    // Placeholder translation
    // ============================================================================
    pub statement_replaced: &'static str,

    // ============================================================================
    // SimpleRPC migration
    // ============================================================================
    pub simple_rpc_found: &'static str,
    pub simple_rpc_main_found: &'static str,
    pub simple_rpc_outdated: &'static str,
    pub simple_rpc_load_failed: &'static str,
    pub simple_rpc_section_missing: &'static str,
    pub server_entries_found: &'static str,
    pub replay_mod_found: &'static str,
    pub migration_complete: &'static str,

    // ============================================================================
    // Tree replacement and schema layers
    // ============================================================================
    pub property_modified: &'static str,
    pub property_write_failed: &'static str,
    pub schema_outdated: &'static str,
    pub schema_layer: &'static str,

    // ============================================================================
    // Persistence
    // ============================================================================
    pub config_save_failed: &'static str,
    pub migrator_started: &'static str,
    pub migrator_finished: &'static str,
}

pub const MIGRATION_MESSAGES: MigrationMessages = MigrationMessages {
    // Legacy properties migration
    legacy_found: "Legacy config data found at {path}, migrating settings to the current format...",
    legacy_load_failed: "Failed to read legacy config data from {path}: {error}",
    legacy_delete_failed: "Failed to remove legacy config file {path}: {error}",
    legacy_property_migrated: "Migrating modified legacy property {name} to JSON property {path}",
    legacy_value_rejected: "Property {path} refused value {value}: {error}",

    // Placeholder translation
    statement_replaced: "Replacing statement in property \"{name}\" ({kind}): \"{old}\" => \"{new}\"",

    // SimpleRPC migration
    simple_rpc_found: "Simple RPC config data found, attempting to migrate settings...",
    simple_rpc_main_found: "Main config file found (Version: {version}, File Version: {file_version}), interpreting data...",
    simple_rpc_outdated: "You are using an outdated Simple RPC config file (Must be at least v{required}, you have v{found}), skipping...",
    simple_rpc_load_failed: "Failed to read Simple RPC config file {path}: {error}",
    simple_rpc_section_missing: "Section \"{section}\" not present in Simple RPC config, skipping",
    server_entries_found: "Server entries file found (Version: {version}, File Version: {file_version}), interpreting data...",
    replay_mod_found: "Replay Mod integration file found (Version: {version}, File Version: {file_version}), interpreting data...",
    migration_complete: "Migration complete, settings are now in the current format",

    // Tree replacement and schema layers
    property_modified: "Modified property \"{key}\": \"{old}\" => \"{new}\"",
    property_write_failed: "Failed to write property \"{key}\": {error}",
    schema_outdated: "Config schema is outdated (v{old}), upgrading to v{new}...",
    schema_layer: "Applying schema changes v{from} -> v{to}",

    // Persistence
    config_save_failed: "Failed to save config data to {path}: {error}",
    migrator_started: "Running migration {id}: {description}",
    migrator_finished: "Migration {id} completed",
};
