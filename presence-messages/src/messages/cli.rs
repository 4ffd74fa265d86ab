//! Summaries printed by the presence-migrate binary

pub struct CliMessages {
    pub legacy_done: &'static str,
    pub simple_rpc_done: &'static str,
    pub simple_rpc_missing: &'static str,
    pub replace_done: &'static str,
    pub migrate_done: &'static str,
    pub migrate_nothing: &'static str,
    pub invalid_rule: &'static str,
}

pub const CLI_MESSAGES: CliMessages = CliMessages {
    legacy_done: "Migrated {source} into {config}",
    simple_rpc_done: "Migrated Simple RPC settings from {dir} into {config}",
    simple_rpc_missing: "No simple-rpc.toml found in {dir}",
    replace_done: "Applied {count} replacement rule(s) to {config}",
    migrate_done: "Config {config} is at schema v{version}",
    migrate_nothing: "Nothing to migrate in {dir}",
    invalid_rule: "Replacement rule '{rule}' must be written as OLD=NEW",
};
