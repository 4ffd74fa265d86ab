//! Path-based access to a configuration tree.
//!
//! Migrations only ever see a config through [`ConfigAccess`]: read a value at a
//! path, write a value at a path, look at the defaults, persist. Paths are
//! segment slices rather than dotted strings because collection keys such as
//! server addresses contain dots themselves.

// External crates
use serde_json::{Map, Value};

// Internal imports
use presence_core::error::{PresenceError, Result};

pub trait ConfigAccess {
    /// Value at `path`, or `None` when any segment is missing.
    fn get(&self, path: &[&str]) -> Option<Value>;

    /// Writes `value` at `path`, creating missing map entries along the way.
    fn set(&mut self, path: &[&str], value: Value) -> Result<()>;

    /// A tree of identical shape holding only default values.
    fn defaults(&self) -> Self
    where
        Self: Sized;

    fn save(&mut self) -> Result<()>;

    fn get_dotted(&self, path: &str) -> Option<Value> {
        self.get(&split_path(path))
    }

    fn set_dotted(&mut self, path: &str, value: Value) -> Result<()> {
        self.set(&split_path(path), value)
    }

    /// Default value at `path`.
    fn default_at(&self, path: &[&str]) -> Option<Value>
    where
        Self: Sized,
    {
        self.defaults().get(path)
    }
}

/// Splits `a.b.c` into segments, ignoring empty ones.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|segment| !segment.is_empty()).collect()
}

pub fn join_path(path: &[&str]) -> String {
    path.join(".")
}

pub fn get_nested<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in path {
        current = current.as_object()?.get(*segment)?;
    }
    Some(current)
}

pub fn set_nested(value: &mut Value, path: &[&str], new_value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Err(PresenceError::Config("Empty property path".to_string()));
    };

    let mut current = value;
    for segment in parents {
        let map = current.as_object_mut().ok_or_else(|| {
            PresenceError::Config(format!(
                "Cannot navigate into non-object at '{}' of '{}'",
                segment,
                join_path(path)
            ))
        })?;
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    match current {
        Value::Object(map) => {
            map.insert(last.to_string(), new_value);
            Ok(())
        }
        _ => Err(PresenceError::Config(format!(
            "Cannot set field on non-object at '{}'",
            join_path(path)
        ))),
    }
}
