use crate::access::ConfigAccess;
use crate::migration::presence::translate_placeholders;
use crate::migration::simple_rpc::{SimpleRpcMigrator, SimpleRpcOutcome, MAIN_FILE};
use crate::migration::{
    config_file, handle_migrations, replace_in_tree, LegacyMigrator, MigrationSources,
    MigrationSummary, PatternTable, RewriteOptions, LEGACY_ENCODING,
};
use crate::schema::FieldKind;
use crate::tree::ConfigTree;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use presence_core::{msg_format, presence_println, presence_success};
use presence_messages::MESSAGES;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "presence-migrate")]
#[command(about = "Migrates older CraftPresence settings into the current JSON config")]
#[command(version)]
pub struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Migrate a legacy craftpresence.properties file
    Legacy {
        /// JSON config to write into (created when missing)
        #[arg(short, long)]
        config: PathBuf,

        /// Legacy properties file (deleted after migration)
        #[arg(short, long)]
        properties: PathBuf,

        /// Character encoding of the properties file
        #[arg(short, long, default_value = LEGACY_ENCODING)]
        encoding: String,
    },

    /// Migrate a SimpleRPC config directory
    SimpleRpc {
        /// JSON config to write into (created when missing)
        #[arg(short, long)]
        config: PathBuf,

        /// Directory holding simple-rpc.toml and its companion files
        #[arg(short, long)]
        dir: PathBuf,

        /// File version the directory layout implies
        #[arg(long, default_value_t = 32)]
        file_version: i32,
    },

    /// Rewrite customized strings across a config
    Replace {
        /// JSON config to rewrite
        #[arg(short, long)]
        config: PathBuf,

        /// Replacement rule written as OLD=NEW (repeatable, applied in order)
        #[arg(short, long = "rule", required = true)]
        rules: Vec<String>,

        /// Only rewrite inside {...} expressions
        #[arg(long)]
        placeholders: bool,

        #[arg(long)]
        match_case: bool,

        #[arg(long)]
        whole_word: bool,

        /// Treat OLD as a regular expression
        #[arg(long)]
        regex: bool,
    },

    /// Discover older configs in a directory and bring everything to the current schema
    Migrate {
        /// Directory holding craftpresence.json
        #[arg(short, long)]
        config_dir: PathBuf,

        /// User directory searched for simple-rpc/
        #[arg(short, long)]
        user_dir: Option<PathBuf>,
    },

    /// Print the modern form of a single legacy value
    Translate {
        value: String,

        /// Property name the value belongs to
        #[arg(short, long, default_value = "")]
        field: String,

        /// Translate as an icon key
        #[arg(long)]
        icon: bool,

        /// Use the SimpleRPC %token% table
        #[arg(long)]
        simple_rpc: bool,
    },
}

pub fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Legacy {
            config,
            properties,
            encoding,
        } => legacy(&config, &properties, &encoding),
        Command::SimpleRpc {
            config,
            dir,
            file_version,
        } => simple_rpc(&config, &dir, file_version),
        Command::Replace {
            config,
            rules,
            placeholders,
            match_case,
            whole_word,
            regex,
        } => {
            let options = RewriteOptions::new(match_case, whole_word, regex);
            replace(&config, &rules, placeholders, options)
        }
        Command::Migrate {
            config_dir,
            user_dir,
        } => migrate(&config_dir, user_dir),
        Command::Translate {
            value,
            field,
            icon,
            simple_rpc,
        } => {
            let translated = if simple_rpc {
                translate_placeholders(&value)
            } else {
                let kind = if icon {
                    FieldKind::Icon
                } else {
                    FieldKind::for_property(&field)
                };
                PatternTable::legacy().translate(&value, &field, kind)
            };
            presence_println!("{}", translated);
            Ok(())
        }
    }
}

fn load_tree(config: &Path) -> Result<ConfigTree> {
    ConfigTree::load(config)
        .with_context(|| format!("Failed to load config {}", config.display()))
}

fn legacy(config: &Path, properties: &Path, encoding: &str) -> Result<()> {
    let mut tree = load_tree(config)?;
    let report = LegacyMigrator::new(properties, encoding).migrate(&mut tree);
    if !report.loaded {
        bail!("Failed to read legacy config {}", properties.display());
    }

    presence_success!(
        "{}",
        msg_format!(
            MESSAGES.cli.legacy_done,
            source = properties.display(),
            config = config.display()
        )
    );
    Ok(())
}

fn simple_rpc(config: &Path, dir: &Path, file_version: i32) -> Result<()> {
    if !dir.join(MAIN_FILE).is_file() {
        bail!("{}", msg_format!(MESSAGES.cli.simple_rpc_missing, dir = dir.display()));
    }

    let mut tree = load_tree(config)?;
    match SimpleRpcMigrator::from_dir(file_version, dir).migrate(&mut tree) {
        SimpleRpcOutcome::Migrated { .. } => {
            presence_success!(
                "{}",
                msg_format!(
                    MESSAGES.cli.simple_rpc_done,
                    dir = dir.display(),
                    config = config.display()
                )
            );
            Ok(())
        }
        SimpleRpcOutcome::Unsupported { found } => {
            bail!(
                "{}",
                msg_format!(
                    MESSAGES.migration.simple_rpc_outdated,
                    required = crate::migration::simple_rpc::LOWEST_SUPPORTED,
                    found = found
                )
            )
        }
        SimpleRpcOutcome::Unreadable => {
            bail!("Failed to read {}", dir.join(MAIN_FILE).display())
        }
    }
}

fn parse_rules(rules: &[String]) -> Result<IndexMap<String, String>> {
    rules
        .iter()
        .map(|rule| match rule.split_once('=') {
            Some((old, new)) if !old.is_empty() => Ok((old.to_string(), new.to_string())),
            _ => bail!("{}", msg_format!(MESSAGES.cli.invalid_rule, rule = rule)),
        })
        .collect()
}

fn replace(config: &Path, rules: &[String], placeholders: bool, options: RewriteOptions) -> Result<()> {
    let replacements = parse_rules(rules)?;
    let mut tree = load_tree(config)?;
    let raw = tree
        .raw_json()
        .cloned()
        .unwrap_or_else(|| tree.as_value().clone());

    let count = replace_in_tree(&mut tree, &raw, &replacements, placeholders, options);
    tree.save()
        .with_context(|| format!("Failed to save config {}", config.display()))?;

    presence_success!(
        "{}",
        msg_format!(
            MESSAGES.cli.replace_done,
            count = count,
            config = config.display()
        )
    );
    Ok(())
}

fn migrate(config_dir: &Path, user_dir: Option<PathBuf>) -> Result<()> {
    let path = config_file(config_dir);
    let mut tree = load_tree(&path)?;
    let mut sources = MigrationSources::new(config_dir);
    if let Some(user_dir) = user_dir {
        sources = sources.with_user_dir(user_dir);
    }

    let new_file = tree.is_new_file();
    let summary = handle_migrations(&mut tree, &sources).context("Migration failed")?;
    if new_file && summary == MigrationSummary::UpToDate {
        presence_println!(
            "{}",
            msg_format!(MESSAGES.cli.migrate_nothing, dir = config_dir.display())
        );
        return Ok(());
    }

    let version = tree
        .get(&["_schemaVersion"])
        .map(|v| v.to_string())
        .unwrap_or_else(|| "?".to_string());
    presence_success!(
        "{}",
        msg_format!(
            MESSAGES.cli.migrate_done,
            config = path.display(),
            version = version
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rules_keeps_order() {
        let rules = vec!["b=2".to_string(), "a=x=y".to_string()];
        let parsed = parse_rules(&rules).unwrap();
        let pairs: Vec<(&str, &str)> = parsed.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "x=y")]);
    }

    #[test]
    fn test_parse_rules_rejects_missing_separator() {
        assert!(parse_rules(&["nothing".to_string()]).is_err());
        assert!(parse_rules(&["=x".to_string()]).is_err());
    }
}
