//! JSON-backed [`ConfigAccess`] implementation for the on-disk config file.

// Standard library
use std::fs;
use std::path::{Path, PathBuf};

// External crates
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use tracing::debug;

// Internal imports
use crate::access::{get_nested, join_path, set_nested, ConfigAccess};
use crate::config::Config;
use presence_core::error::{PresenceError, Result};

/// Version assumed for files written before `_schemaVersion` existed.
pub const UNVERSIONED_SCHEMA: i32 = 1;

static DEFAULT_TREE: Lazy<Value> =
    Lazy::new(|| serde_json::to_value(Config::default()).unwrap_or(Value::Object(Map::new())));

/// The live configuration, held as JSON and type-checked against [`Config`] on every write.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    root: Value,
    path: Option<PathBuf>,
    raw: Option<Value>,
    disk_schema_version: i32,
    is_new_file: bool,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self {
            root: DEFAULT_TREE.clone(),
            path: None,
            raw: None,
            disk_schema_version: UNVERSIONED_SCHEMA,
            is_new_file: true,
        }
    }
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            root: serde_json::to_value(config)?,
            ..Self::default()
        })
    }

    /// Reads `path` if it exists; otherwise returns a default tree that will be written there.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No config at {}, starting from defaults", path.display());
            return Ok(Self::default().with_path(path));
        }

        let contents = fs::read_to_string(&path)?;
        let raw: Value = serde_json::from_str(&contents)?;
        let config: Config = serde_json::from_value(raw.clone()).map_err(|e| {
            PresenceError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;
        let disk_schema_version = raw
            .get("_schemaVersion")
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(UNVERSIONED_SCHEMA);

        Ok(Self {
            root: serde_json::to_value(&config)?,
            path: Some(path),
            raw: Some(raw),
            disk_schema_version,
            is_new_file: false,
        })
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_new_file(&self) -> bool {
        self.is_new_file
    }

    /// Schema version stamped in the file as it was read ([`UNVERSIONED_SCHEMA`] when absent or new).
    pub fn disk_schema_version(&self) -> i32 {
        self.disk_schema_version
    }

    /// The JSON document exactly as read from disk, before defaults were filled in.
    pub fn raw_json(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn to_config(&self) -> Result<Config> {
        Ok(serde_json::from_value(self.root.clone())?)
    }
}

impl ConfigAccess for ConfigTree {
    fn get(&self, path: &[&str]) -> Option<Value> {
        get_nested(&self.root, path).cloned()
    }

    fn set(&mut self, path: &[&str], value: Value) -> Result<()> {
        let mut candidate = self.root.clone();
        set_nested(&mut candidate, path, value)?;

        let typed: Config = serde_json::from_value(candidate).map_err(|e| {
            PresenceError::Config(format!("Invalid value for '{}': {}", join_path(path), e))
        })?;
        let normalized = serde_json::to_value(&typed)?;
        if get_nested(&normalized, path).is_none() {
            return Err(PresenceError::Config(format!(
                "Unknown property '{}'",
                join_path(path)
            )));
        }

        self.root = normalized;
        Ok(())
    }

    fn defaults(&self) -> Self {
        Self::default()
    }

    fn save(&mut self) -> Result<()> {
        let Some(path) = self.path.as_ref() else {
            debug!("Config tree has no backing file, skipping save");
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut contents = serde_json::to_string_pretty(&self.root)?;
        contents.push('\n');
        fs::write(path, contents)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }
}
