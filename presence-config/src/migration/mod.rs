//! Migration engine: legacy properties, SimpleRPC TOML, placeholder
//! rewriting and schema-upgrade layers.

// Standard library
use std::path::{Path, PathBuf};

// External crates
use serde_json::Value;
use tracing::{debug, info, warn};

// Internal imports
use crate::access::ConfigAccess;
use crate::config::SCHEMA_VERSION;
use crate::tree::ConfigTree;
use presence_core::error::Result;
use presence_core::msg_format;
use presence_messages::MESSAGES;

pub mod expressions;
pub mod layers;
pub mod legacy;
pub mod patterns;
pub mod presence;
pub mod rewriter;
pub mod simple_rpc;
pub mod text_replacer;

pub use layers::upgrade_schema;
pub use legacy::{LegacyMigrator, LegacyReport};
pub use patterns::PatternTable;
pub use presence::{MigrationContext, VersionChannels};
pub use rewriter::{replace_all, rewrite, RewriteOptions};
pub use simple_rpc::{SimpleRpcMigrator, SimpleRpcOutcome};
pub use text_replacer::{replace_in_tree, TextReplacer};

/// Legacy flat config looked up inside the config directory.
pub const LEGACY_FILE: &str = "craftpresence.properties";
pub const LEGACY_ENCODING: &str = "UTF-8";

/// A one-shot transformation of a config tree.
pub trait DataMigrator<C: ConfigAccess> {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// `raw` is the on-disk JSON the tree was loaded from, when there is one.
    fn apply(&self, config: &mut C, raw: Option<&Value>) -> Result<()>;
}

pub fn run_migrator<C, M>(migrator: &M, config: &mut C, raw: Option<&Value>) -> Result<()>
where
    C: ConfigAccess,
    M: DataMigrator<C> + ?Sized,
{
    info!(
        "{}",
        msg_format!(
            MESSAGES.migration.migrator_started,
            id = migrator.id(),
            description = migrator.description()
        )
    );

    migrator.apply(config, raw).map_err(|e| {
        warn!("Migration {} failed: {}", migrator.id(), e);
        e
    })?;

    info!(
        "{}",
        msg_format!(MESSAGES.migration.migrator_finished, id = migrator.id())
    );
    Ok(())
}

/// Where older configs may be found.
#[derive(Debug, Clone)]
pub struct MigrationSources {
    pub config_dir: PathBuf,
    pub user_dir: Option<PathBuf>,
}

impl MigrationSources {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            user_dir: None,
        }
    }

    pub fn with_user_dir(mut self, user_dir: impl Into<PathBuf>) -> Self {
        self.user_dir = Some(user_dir.into());
        self
    }

    pub fn legacy_file(&self) -> PathBuf {
        self.config_dir.join(LEGACY_FILE)
    }

    /// SimpleRPC directories in search order, with the file version each implies.
    pub fn simple_rpc_dirs(&self) -> Vec<(i32, PathBuf)> {
        let mut dirs = vec![(0, self.config_dir.clone())];
        if let Some(user_dir) = &self.user_dir {
            dirs.push((31, user_dir.join("simple-rpc")));
        }
        dirs.push((32, self.config_dir.join("simple-rpc")));
        dirs
    }

    fn find_simple_rpc(&self) -> Option<(i32, PathBuf)> {
        self.simple_rpc_dirs()
            .into_iter()
            .find(|(_, dir)| dir.join(simple_rpc::MAIN_FILE).is_file())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationSummary {
    Legacy { source: PathBuf },
    SimpleRpc { dir: PathBuf, file_version: i32 },
    SchemaUpgraded { from: i32, to: i32 },
    UpToDate,
}

/// Picks and runs whichever migrations apply to `tree`.
pub fn handle_migrations(tree: &mut ConfigTree, sources: &MigrationSources) -> Result<MigrationSummary> {
    if tree.is_new_file() {
        let legacy_file = sources.legacy_file();
        if legacy_file.is_file() {
            let migrator = LegacyMigrator::new(&legacy_file, LEGACY_ENCODING);
            run_migrator(&migrator, tree, None)?;
            upgrade_schema(tree, None, 1);
            return Ok(MigrationSummary::Legacy {
                source: legacy_file,
            });
        }

        if let Some((file_version, dir)) = sources.find_simple_rpc() {
            let migrator = SimpleRpcMigrator::from_dir(file_version, &dir);
            run_migrator(&migrator, tree, None)?;
            return Ok(MigrationSummary::SimpleRpc { dir, file_version });
        }

        debug!("No older config data found in {}", sources.config_dir.display());
        return Ok(MigrationSummary::UpToDate);
    }

    upgrade_existing(tree)
}

fn upgrade_existing(tree: &mut ConfigTree) -> Result<MigrationSummary> {
    let from = tree.disk_schema_version();
    if from >= SCHEMA_VERSION {
        debug!("Config schema v{} is current", from);
        return Ok(MigrationSummary::UpToDate);
    }

    info!(
        "{}",
        msg_format!(MESSAGES.migration.schema_outdated, old = from, new = SCHEMA_VERSION)
    );
    let raw = tree.raw_json().cloned();
    let to = upgrade_schema(tree, raw.as_ref(), from);
    Ok(MigrationSummary::SchemaUpgraded { from, to })
}

/// Default JSON config location inside `config_dir`.
pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("craftpresence.json")
}
