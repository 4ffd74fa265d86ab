//! In-memory [`ConfigAccess`] double that records how it was used.

// External crates
use serde_json::Value;

// Internal imports
use crate::access::{get_nested, join_path, set_nested, ConfigAccess};
use crate::config::Config;
use presence_core::error::{PresenceError, Result};

#[derive(Debug, Clone)]
pub struct MemoryConfig {
    root: Value,
    defaults: Value,
    set_calls: usize,
    saves: usize,
    read_only: Vec<String>,
}

impl MemoryConfig {
    /// A tree whose defaults are a copy of `root`.
    pub fn new(root: Value) -> Self {
        Self::with_defaults(root.clone(), root)
    }

    pub fn with_defaults(root: Value, defaults: Value) -> Self {
        Self {
            root,
            defaults,
            set_calls: 0,
            saves: 0,
            read_only: Vec::new(),
        }
    }

    /// Starts from the default modern config.
    pub fn from_default_config() -> Result<Self> {
        Ok(Self::new(serde_json::to_value(Config::default())?))
    }

    /// Makes `set` fail for the dotted `path`.
    pub fn read_only(mut self, path: &str) -> Self {
        self.read_only.push(path.to_string());
        self
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls
    }

    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn reset_counters(&mut self) {
        self.set_calls = 0;
        self.saves = 0;
    }

    pub fn value(&self) -> &Value {
        &self.root
    }
}

impl ConfigAccess for MemoryConfig {
    fn get(&self, path: &[&str]) -> Option<Value> {
        get_nested(&self.root, path).cloned()
    }

    fn set(&mut self, path: &[&str], value: Value) -> Result<()> {
        self.set_calls += 1;
        let dotted = join_path(path);
        if self.read_only.contains(&dotted) {
            return Err(PresenceError::Config(format!("'{}' is read-only", dotted)));
        }
        set_nested(&mut self.root, path, value)
    }

    fn defaults(&self) -> Self {
        Self::with_defaults(self.defaults.clone(), self.defaults.clone())
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}
