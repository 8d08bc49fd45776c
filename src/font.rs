//! Font records: partial maps from font attribute name to value.

use crate::settings::Settings;
use log::debug;
use serde_json::{Map, Value};

/// Every font attribute the presets know about, in display order.
pub const ATTRIBUTES: &[&str] = &[
    "font_face",
    "font_size",
    "line_padding_bottom",
    "line_padding_top",
    "word_wrap",
    "wrap_width",
];

/// One font preset. Keys that aren't present are unspecified, not defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontRecord(Map<String, Value>);

impl FontRecord {
    pub fn new() -> Self {
        FontRecord(Map::new())
    }

    /// The active font of a settings store: every recognized attribute that
    /// has a value there.
    pub fn from_settings<S: Settings + ?Sized>(settings: &S) -> Self {
        let mut record = FontRecord::new();
        for &key in ATTRIBUTES {
            if let Some(value) = settings.get(key) {
                record.0.insert(key.to_string(), value);
            }
        }
        record
    }

    /// Normalize a stored list entry. A bare string names a font face; an
    /// object is taken as-is. Anything else is skipped.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        match entry {
            Value::String(face) => Some(FontRecord::new().with("font_face", face.as_str())),
            Value::Object(map) => Some(FontRecord(map.clone())),
            other => {
                debug!("Skipping font list entry that is neither a string nor an object: {other}");
                None
            }
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// True when every key of `other` is present here with an equal value.
    /// Vacuously true for an empty `other`.
    pub fn contains(&self, other: &FontRecord) -> bool {
        other
            .0
            .iter()
            .all(|(key, value)| self.0.get(key).is_some_and(|v| values_equal(v, value)))
    }

    /// Merge this record into `settings` key by key.
    pub fn apply_to<S: Settings + ?Sized>(&self, settings: &mut S) {
        settings.update(&self.0);
    }

    /// Make `settings` hold exactly this record's font attributes: present
    /// ones are written, absent ones erased. Non-font keys are left alone.
    pub fn restore_into<S: Settings + ?Sized>(&self, settings: &mut S) {
        for &key in ATTRIBUTES {
            match self.0.get(key) {
                Some(value) => settings.set(key, value.clone()),
                None => settings.erase(key),
            }
        }
    }

    /// List label: the font face, or empty.
    pub fn label(&self) -> String {
        self.0.get("font_face").map(display_value).unwrap_or_default()
    }

    /// `key: value` pairs in record order.
    pub fn details(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}: {}", display_value(value)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl Settings for FontRecord {
    fn get(&self, key: &str) -> Option<Value> {
        Settings::get(&self.0, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        Settings::set(&mut self.0, key, value);
    }

    fn erase(&mut self, key: &str) {
        Settings::erase(&mut self.0, key);
    }
}

/// Numbers compare numerically so `12` and `12.0` are the same size.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Strings print bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
