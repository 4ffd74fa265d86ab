pub use anyhow::bail;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenceError {
    Config(String),
    Io(#[from] std::io::Error),
    Parse(String),
    Serialization(String),
    Migration(String),
    Internal(String),
    Other(#[from] anyhow::Error),
}

impl Display for PresenceError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PresenceError::Config(s) => write!(f, "Configuration error: {}", s),
            PresenceError::Io(e) => write!(f, "I/O error: {}", e),
            PresenceError::Parse(s) => write!(f, "Parse error: {}", s),
            PresenceError::Serialization(s) => write!(f, "Serialization error: {}", s),
            PresenceError::Migration(s) => write!(f, "Migration error: {}", s),
            PresenceError::Internal(s) => write!(f, "Internal error: {}", s),
            PresenceError::Other(e) => write!(f, "Other error: {}", e),
        }
    }
}

impl From<serde_json::Error> for PresenceError {
    fn from(err: serde_json::Error) -> Self {
        PresenceError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PresenceError {
    fn from(err: toml::de::Error) -> Self {
        PresenceError::Parse(err.message().to_string())
    }
}

pub type Result<T> = std::result::Result<T, PresenceError>;
