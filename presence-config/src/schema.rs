//! Shape detection for configuration values.
//!
//! Legacy array encodings are converted into whatever record type the target
//! collection already holds. The record type is read once per collection from
//! its `"default"` entry and resolved to a [`RecordShape`], which then drives
//! a fixed converter for every element.

// External crates
use serde_json::{Map, Value};

/// Which family of placeholders a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Icon,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Icon => "icon",
        }
    }

    /// `icon` for image-key properties, `text` for everything else.
    pub fn for_property(name: &str) -> Self {
        if name.contains("ImageKey") {
            FieldKind::Icon
        } else {
            FieldKind::Text
        }
    }
}

/// Record types a legacy collection element can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    /// `{ first: text, second: icon }`
    Pair,
    /// `{ first, second, third }`, all text
    Tuple,
    /// `ModuleData { textOverride, iconOverride }`
    Module,
    /// `Button { label, url }`
    Button,
    /// A bare string
    Plain,
}

type Assembler = fn(Vec<Option<String>>) -> Value;

struct ShapeLayout {
    fields: &'static [FieldKind],
    assemble: Assembler,
}

const PAIR: ShapeLayout = ShapeLayout {
    fields: &[FieldKind::Text, FieldKind::Icon],
    assemble: assemble_positional,
};

const TUPLE: ShapeLayout = ShapeLayout {
    fields: &[FieldKind::Text, FieldKind::Text, FieldKind::Text],
    assemble: assemble_positional,
};

const MODULE: ShapeLayout = ShapeLayout {
    fields: &[FieldKind::Text, FieldKind::Icon],
    assemble: assemble_module,
};

const BUTTON: ShapeLayout = ShapeLayout {
    fields: &[FieldKind::Text, FieldKind::Text],
    assemble: assemble_button,
};

const PLAIN: ShapeLayout = ShapeLayout {
    fields: &[FieldKind::Text],
    assemble: assemble_plain,
};

const POSITIONAL_KEYS: [&str; 3] = ["first", "second", "third"];

fn assemble_positional(parts: Vec<Option<String>>) -> Value {
    let map: Map<String, Value> = POSITIONAL_KEYS
        .iter()
        .zip(parts)
        .map(|(key, part)| (key.to_string(), part.map(Value::String).unwrap_or(Value::Null)))
        .collect();
    Value::Object(map)
}

fn assemble_module(parts: Vec<Option<String>>) -> Value {
    let mut map = Map::new();
    let mut parts = parts.into_iter();
    if let Some(Some(text)) = parts.next() {
        map.insert("textOverride".to_string(), Value::String(text));
    }
    if let Some(Some(icon)) = parts.next() {
        map.insert("iconOverride".to_string(), Value::String(icon));
    }
    Value::Object(map)
}

fn assemble_button(parts: Vec<Option<String>>) -> Value {
    let mut parts = parts.into_iter().map(Option::unwrap_or_default);
    let mut map = Map::new();
    map.insert("label".to_string(), Value::String(parts.next().unwrap_or_default()));
    map.insert("url".to_string(), Value::String(parts.next().unwrap_or_default()));
    Value::Object(map)
}

fn assemble_plain(parts: Vec<Option<String>>) -> Value {
    Value::String(parts.into_iter().next().flatten().unwrap_or_default())
}

impl RecordShape {
    /// Resolves the shape from a collection's `"default"` entry.
    pub fn infer(default_entry: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = default_entry else {
            return RecordShape::Plain;
        };

        if map.contains_key("label") || map.contains_key("url") {
            RecordShape::Button
        } else if map.contains_key("first") && map.contains_key("third") {
            RecordShape::Tuple
        } else if map.contains_key("first") {
            RecordShape::Pair
        } else {
            RecordShape::Module
        }
    }

    fn layout(self) -> &'static ShapeLayout {
        match self {
            RecordShape::Pair => &PAIR,
            RecordShape::Tuple => &TUPLE,
            RecordShape::Module => &MODULE,
            RecordShape::Button => &BUTTON,
            RecordShape::Plain => &PLAIN,
        }
    }

    /// Field kinds of the positional values, in order.
    pub fn fields(self) -> &'static [FieldKind] {
        self.layout().fields
    }

    /// Builds one record from positional `parts`, passing each present part
    /// through `translate` with the kind of its slot.
    pub fn build<F>(self, parts: &[&str], mut translate: F) -> Value
    where
        F: FnMut(&str, FieldKind) -> String,
    {
        let layout = self.layout();
        let values = layout
            .fields
            .iter()
            .enumerate()
            .map(|(index, kind)| parts.get(index).map(|part| translate(part, *kind)))
            .collect();
        (layout.assemble)(values)
    }
}

/// Coarse classification of a JSON value as the migration engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    Text,
    /// Keyed collection carrying a `"default"` entry.
    Collection(RecordShape),
    /// Fixed record (category, module data, presence data, button).
    Record,
    List,
    Null,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Float,
            Value::String(_) => ValueKind::Text,
            Value::Object(map) if map.contains_key("default") => {
                ValueKind::Collection(RecordShape::infer(map.get("default")))
            }
            Value::Object(_) => ValueKind::Record,
            Value::Array(_) => ValueKind::List,
            Value::Null => ValueKind::Null,
        }
    }

    pub fn is_record(self) -> bool {
        self == ValueKind::Record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn upper(value: &str, kind: FieldKind) -> String {
        format!("{}:{}", kind.as_str(), value.to_uppercase())
    }

    #[test]
    fn test_infer_shapes_from_default_entry() {
        assert_eq!(RecordShape::infer(None), RecordShape::Plain);
        assert_eq!(RecordShape::infer(Some(&json!("x"))), RecordShape::Plain);
        assert_eq!(
            RecordShape::infer(Some(&json!({ "first": "a", "second": null }))),
            RecordShape::Pair
        );
        assert_eq!(
            RecordShape::infer(Some(&json!({ "first": "a", "second": "b", "third": "c" }))),
            RecordShape::Tuple
        );
        assert_eq!(
            RecordShape::infer(Some(&json!({ "label": "", "url": "" }))),
            RecordShape::Button
        );
        assert_eq!(
            RecordShape::infer(Some(&json!({ "textOverride": "x" }))),
            RecordShape::Module
        );
    }

    #[test]
    fn test_build_pair_routes_kinds_by_position() {
        let value = RecordShape::Pair.build(&["a", "b"], upper);
        assert_eq!(value, json!({ "first": "text:A", "second": "icon:B" }));
    }

    #[test]
    fn test_build_tuple_leaves_missing_positions_null() {
        let value = RecordShape::Tuple.build(&["a"], upper);
        assert_eq!(value, json!({ "first": "text:A", "second": null, "third": null }));
    }

    #[test]
    fn test_build_module_omits_missing_icon() {
        let value = RecordShape::Module.build(&["a"], upper);
        assert_eq!(value, json!({ "textOverride": "text:A" }));
    }

    #[test]
    fn test_build_button_and_plain() {
        assert_eq!(
            RecordShape::Button.build(&["go", "https://x"], upper),
            json!({ "label": "text:GO", "url": "text:HTTPS://X" })
        );
        assert_eq!(RecordShape::Plain.build(&[], upper), json!(""));
        assert_eq!(RecordShape::Plain.build(&["v", "extra"], upper), json!("text:V"));
    }

    #[test]
    fn test_value_kind_classification() {
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Boolean);
        assert_eq!(ValueKind::of(&json!(3)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(0.5)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!("s")), ValueKind::Text);
        assert_eq!(
            ValueKind::of(&json!({ "default": { "textOverride": "x" } })),
            ValueKind::Collection(RecordShape::Module)
        );
        assert_eq!(ValueKind::of(&json!({ "textOverride": "x" })), ValueKind::Record);
        assert_eq!(ValueKind::of(&json!([])), ValueKind::List);
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
    }

    #[test]
    fn test_field_kind_for_property() {
        assert_eq!(FieldKind::for_property("largeImageKeyFormat"), FieldKind::Icon);
        assert_eq!(FieldKind::for_property("detailsMessageFormat"), FieldKind::Text);
    }
}
