//! presence-messages
//!
//! Message catalog for the presence migration tools.
//! Every log banner, failure report and CLI summary is a template here,
//! filled with `presence_core::msg_format!`.

pub mod messages;

pub use messages::{CliMessages, MigrationMessages, Messages, MESSAGES};
