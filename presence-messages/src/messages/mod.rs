//! Central registry for message templates.
//!
//! - `migration` - log output of the migration engine (banners, failures, per-field changes)
//! - `cli` - summaries printed by the `presence-migrate` binary
//!
//! ```rust
//! use presence_messages::MESSAGES;
//!
//! let banner = MESSAGES.migration.simple_rpc_found;
//! let summary = MESSAGES.cli.legacy_done;
//! ```

mod cli;
mod migration;

pub use cli::{CliMessages, CLI_MESSAGES};
pub use migration::{MigrationMessages, MIGRATION_MESSAGES};

pub struct Messages {
    pub migration: MigrationMessages,
    pub cli: CliMessages,
}

pub const MESSAGES: Messages = Messages {
    migration: MIGRATION_MESSAGES,
    cli: CLI_MESSAGES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_not_empty() {
        let templates = [
            MESSAGES.migration.legacy_found,
            MESSAGES.migration.legacy_load_failed,
            MESSAGES.migration.legacy_delete_failed,
            MESSAGES.migration.simple_rpc_outdated,
            MESSAGES.migration.migration_complete,
            MESSAGES.cli.legacy_done,
            MESSAGES.cli.replace_done,
        ];
        for template in templates {
            assert!(!template.trim().is_empty());
        }
    }

    #[test]
    fn test_outdated_template_names_both_versions() {
        let template = MESSAGES.migration.simple_rpc_outdated;
        assert!(template.contains("{required}"));
        assert!(template.contains("{found}"));
    }
}
