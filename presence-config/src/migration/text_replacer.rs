//! Walks a config tree alongside its raw JSON source and rewrites string
//! values that the user actually customized.

// External crates
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, error};

// Internal imports
use super::expressions::find_brace_expressions;
use super::rewriter::{rewrite, RewriteOptions};
use super::DataMigrator;
use crate::access::{join_path, ConfigAccess};
use crate::schema::ValueKind;
use presence_core::error::Result;
use presence_core::msg_format;
use presence_messages::MESSAGES;

#[derive(Debug, Clone, Default)]
pub struct TextReplacer {
    replacements: IndexMap<String, String>,
    placeholder_mode: bool,
    options: RewriteOptions,
}

impl TextReplacer {
    pub fn new(replacements: IndexMap<String, String>, options: RewriteOptions) -> Self {
        Self {
            replacements,
            placeholder_mode: false,
            options,
        }
    }

    /// Rewrites only inside `{...}` expressions.
    pub fn placeholders<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let replacements = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            replacements,
            placeholder_mode: true,
            options: RewriteOptions::default(),
        }
    }

    pub fn with_placeholder_mode(mut self, enabled: bool) -> Self {
        self.placeholder_mode = enabled;
        self
    }

    pub fn replacements(&self) -> &IndexMap<String, String> {
        &self.replacements
    }

    /// Rewrites `original`, returning the new text.
    pub fn process_replacement(&self, original: &str) -> String {
        if !self.placeholder_mode {
            return rewrite(original, &self.replacements, self.options);
        }

        let mut result = original.to_string();
        for expression in find_brace_expressions(original) {
            let rewritten = rewrite(expression, &self.replacements, self.options);
            if rewritten != expression {
                result = result.replace(expression, &rewritten);
            }
        }
        result
    }

    /// Applies the replacements to every string in `config` that has a
    /// counterpart in `raw`. Returns the number of modified properties.
    pub fn apply<C: ConfigAccess>(&self, config: &mut C, raw: &Value) -> usize {
        if self.replacements.is_empty() {
            return 0;
        }
        let defaults = config.defaults();
        let mut path = Vec::new();
        self.walk(config, &defaults, raw, &mut path)
    }

    fn walk<C: ConfigAccess>(
        &self,
        config: &mut C,
        defaults: &C,
        raw: &Value,
        path: &mut Vec<String>,
    ) -> usize {
        let Value::Object(raw_map) = raw else {
            return 0;
        };

        let mut modified = 0;
        for (key, raw_child) in raw_map {
            path.push(key.clone());
            modified += self.visit(config, defaults, raw_child, path);
            path.pop();
        }
        modified
    }

    fn visit<C: ConfigAccess>(
        &self,
        config: &mut C,
        defaults: &C,
        raw: &Value,
        path: &mut Vec<String>,
    ) -> usize {
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        let Some(live) = config.get(&segments) else {
            return 0;
        };
        let kind = defaults
            .get(&segments)
            .map(|default| ValueKind::of(&default))
            .unwrap_or_else(|| ValueKind::of(&live));

        match (&live, kind) {
            (Value::String(original), _) => {
                let replaced = self.process_replacement(original);
                if replaced == *original {
                    return 0;
                }
                debug!(
                    "{}",
                    msg_format!(
                        MESSAGES.migration.property_modified,
                        key = join_path(&segments),
                        old = original,
                        new = replaced
                    )
                );
                match config.set(&segments, Value::String(replaced)) {
                    Ok(()) => 1,
                    Err(e) => {
                        error!(
                            "{}",
                            msg_format!(
                                MESSAGES.migration.property_write_failed,
                                key = join_path(&segments),
                                error = e
                            )
                        );
                        0
                    }
                }
            }
            (Value::Object(_), ValueKind::Record) => self.walk(config, defaults, raw, path),
            (Value::Object(entries), ValueKind::Collection(_)) => {
                let Value::Object(raw_entries) = raw else {
                    return 0;
                };
                let mut modified = 0;
                // String-valued entries (dynamicVariables) are left untouched
                for entry in entries.keys() {
                    let Some(raw_entry) = raw_entries.get(entry).filter(|v| v.is_object()) else {
                        continue;
                    };
                    path.push(entry.clone());
                    modified += self.walk(config, defaults, raw_entry, path);
                    path.pop();
                }
                modified
            }
            _ => 0,
        }
    }
}

/// Runs `replacements` over `config` once and returns the modified count.
pub fn replace_in_tree<C: ConfigAccess>(
    config: &mut C,
    raw: &Value,
    replacements: &IndexMap<String, String>,
    placeholder_mode: bool,
    options: RewriteOptions,
) -> usize {
    TextReplacer::new(replacements.clone(), options)
        .with_placeholder_mode(placeholder_mode)
        .apply(config, raw)
}

impl<C: ConfigAccess> DataMigrator<C> for TextReplacer {
    fn id(&self) -> &'static str {
        "text-replacer"
    }

    fn description(&self) -> &'static str {
        "rewrite customized config strings"
    }

    fn apply(&self, config: &mut C, raw: Option<&Value>) -> Result<()> {
        let modified = match raw {
            Some(raw) => TextReplacer::apply(self, config, raw),
            None => {
                let snapshot = config.get(&[]).unwrap_or(Value::Null);
                TextReplacer::apply(self, config, &snapshot)
            }
        };
        debug!("Text replacer modified {} properties", modified);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryConfig;
    use serde_json::json;

    fn time_rules() -> TextReplacer {
        TextReplacer::placeholders([
            ("world.time24", "world.time.format_24"),
            ("world.day", "world.time.day"),
        ])
    }

    #[test]
    fn test_placeholder_mode_only_touches_expressions() {
        let replacer = time_rules();
        assert_eq!(
            replacer.process_replacement("world.day is {world.day}"),
            "world.day is {world.time.day}"
        );
    }

    #[test]
    fn test_plain_mode_rewrites_whole_string() {
        let mut rules = IndexMap::new();
        rules.insert("world.day".to_string(), "world.time.day".to_string());
        let replacer = TextReplacer::new(rules, RewriteOptions::default());
        assert_eq!(
            replacer.process_replacement("world.day is {world.day}"),
            "world.time.day is {world.time.day}"
        );
    }

    #[test]
    fn test_only_raw_keys_are_visited() {
        let tree = json!({
            "a": { "details": "{world.day}", "state": "{world.day}" }
        });
        let mut config = MemoryConfig::new(tree);
        let raw = json!({ "a": { "details": "{world.day}" } });

        let modified = time_rules().apply(&mut config, &raw);

        assert_eq!(modified, 1);
        assert_eq!(config.get(&["a", "details"]), Some(json!("{world.time.day}")));
        assert_eq!(config.get(&["a", "state"]), Some(json!("{world.day}")));
    }

    #[test]
    fn test_collection_entries_with_raw_objects_are_walked() {
        let defaults = json!({
            "servers": { "default": { "textOverride": "" } }
        });
        let tree = json!({
            "servers": {
                "default": { "textOverride": "" },
                "mc.example.com": { "textOverride": "{world.time24}" },
                "other.net": { "textOverride": "{world.time24}" }
            }
        });
        let raw = json!({
            "servers": {
                "mc.example.com": { "textOverride": "{world.time24}" },
                "other.net": "not an object"
            }
        });
        let mut config = MemoryConfig::with_defaults(tree, defaults);

        assert_eq!(time_rules().apply(&mut config, &raw), 1);
        assert_eq!(
            config.get(&["servers", "mc.example.com", "textOverride"]),
            Some(json!("{world.time.format_24}"))
        );
        assert_eq!(
            config.get(&["servers", "other.net", "textOverride"]),
            Some(json!("{world.time24}"))
        );
    }

    #[test]
    fn test_unchanged_strings_are_not_written() {
        let mut config = MemoryConfig::new(json!({ "a": "{player.name}" }));
        let raw = config.value().clone();
        assert_eq!(time_rules().apply(&mut config, &raw), 0);
        assert_eq!(config.set_calls(), 0);
    }
}
