//! Record types shared across config categories.

// External crate imports
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A clickable button attached to a presence payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Button {
    pub label: String,
    pub url: String,
}

impl Button {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// A full status payload: text lines, images, timestamps and buttons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresenceData {
    pub enabled: bool,
    pub use_as_main: bool,
    pub is_instance: bool,
    pub activity_type: i32,
    pub party_privacy: i32,
    pub details: String,
    pub game_state: String,
    pub large_image_key: String,
    pub large_image_text: String,
    pub small_image_key: String,
    pub small_image_text: String,
    pub start_timestamp: String,
    pub end_timestamp: String,
    pub buttons: IndexMap<String, Button>,
}

impl Default for PresenceData {
    fn default() -> Self {
        let mut buttons = IndexMap::new();
        buttons.insert("default".to_string(), Button::default());

        Self {
            enabled: true,
            use_as_main: false,
            is_instance: false,
            activity_type: 0,
            party_privacy: 0,
            details: String::new(),
            game_state: String::new(),
            large_image_key: String::new(),
            large_image_text: String::new(),
            small_image_key: String::new(),
            small_image_text: String::new(),
            start_timestamp: String::new(),
            end_timestamp: String::new(),
            buttons,
        }
    }
}

impl PresenceData {
    /// Empty payload with no button entries, the starting point for converted data.
    pub fn blank() -> Self {
        Self {
            buttons: IndexMap::new(),
            ..Default::default()
        }
    }

    pub fn add_button(&mut self, key: impl Into<String>, button: Button) {
        self.buttons.insert(key.into(), button);
    }
}

/// Per-entity override: optional text/icon plus an optional full payload.
///
/// A missing override means "use the entity's own name or icon".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_override: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PresenceData>,
}

impl ModuleData {
    pub fn new(text_override: Option<&str>, icon_override: Option<&str>) -> Self {
        Self {
            text_override: text_override.map(str::to_string),
            icon_override: icon_override.map(str::to_string),
            data: None,
        }
    }

    pub fn text(text_override: &str) -> Self {
        Self::new(Some(text_override), None)
    }

    pub fn with_data(data: PresenceData) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_module_data_omits_missing_overrides() {
        let value = serde_json::to_value(ModuleData::text("In {biome.name}")).unwrap();
        assert_eq!(value, json!({ "textOverride": "In {biome.name}" }));
    }

    #[test]
    fn test_presence_data_uses_camel_case() {
        let value = serde_json::to_value(PresenceData::blank()).unwrap();
        assert_eq!(value["useAsMain"], json!(false));
        assert_eq!(value["largeImageKey"], json!(""));
        assert_eq!(value["buttons"], json!({}));
    }

    #[test]
    fn test_default_presence_carries_default_button() {
        let data = PresenceData::default();
        assert!(data.enabled);
        assert!(data.buttons.contains_key("default"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let data: PresenceData = serde_json::from_value(json!({ "details": "x" })).unwrap();
        assert_eq!(data.details, "x");
        assert!(data.enabled);
    }
}
