//! CraftPresence config library.
//!
//! Holds the typed modern config, a path-addressed view of it
//! ([`ConfigAccess`]), and the migration engine that moves older settings
//! (legacy `.properties` files, SimpleRPC TOML configs, earlier JSON schema
//! versions) into it.
//!
//! ## Main Features
//! - Typed config model with JSON persistence
//! - Legacy properties and SimpleRPC migration
//! - Placeholder translation and tree-wide string rewriting
//! - Schema-upgrade layers and migration discovery

pub mod access;
pub mod cli;
pub mod config;
pub mod elements;
pub mod migration;
pub mod properties;
pub mod schema; // Record shapes and value kinds
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod tree;

pub use access::ConfigAccess;
pub use config::{Config, SCHEMA_VERSION};
pub use elements::{Button, ModuleData, PresenceData};
pub use migration::{handle_migrations, DataMigrator, MigrationSources, MigrationSummary};
pub use properties::Properties;
pub use tree::ConfigTree;
