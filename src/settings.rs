//! Key-value settings stores.
//!
//! [`Settings`] is the small surface the font logic needs from a store:
//! read a key, write a key, erase a key. [`PreferenceStore`] adds `save` for
//! stores that live on disk. Plain `serde_json::Map`s implement [`Settings`]
//! directly, which is what surface-local overrides and tests use.

use crate::error::{Error, Result};
use log::debug;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub trait Settings {
    /// Value stored under `key`. `null` counts as unset.
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value);

    fn erase(&mut self, key: &str);

    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Merge every entry of `values` into the store, leaving other keys alone.
    fn update(&mut self, values: &Map<String, Value>) {
        for (key, value) in values {
            self.set(key, value.clone());
        }
    }
}

/// A [`Settings`] store that can be written back to where it came from.
pub trait PreferenceStore: Settings {
    fn save(&mut self) -> Result<()>;
}

impl Settings for Map<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        match Map::get(self, key) {
            Some(Value::Null) | None => None,
            Some(v) => Some(v.clone()),
        }
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }

    fn erase(&mut self, key: &str) {
        self.shift_remove(key);
    }
}

// ── JSON file store ─────────────────────────────────────────────────────

/// A settings document backed by a JSON object on disk.
///
/// A missing file loads as an empty document; keys the font logic doesn't
/// know about are kept in their original order and written back untouched.
#[derive(Debug)]
pub struct SettingsFile {
    path: PathBuf,
    values: Map<String, Value>,
}

impl SettingsFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match read_json_object(&path)? {
            Some(values) => values,
            None => {
                debug!("{} does not exist, starting empty", path.display());
                Map::new()
            }
        };
        Ok(SettingsFile { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Settings for SettingsFile {
    fn get(&self, key: &str) -> Option<Value> {
        Settings::get(&self.values, key)
    }

    fn set(&mut self, key: &str, value: Value) {
        Settings::set(&mut self.values, key, value);
    }

    fn erase(&mut self, key: &str) {
        Settings::erase(&mut self.values, key);
    }
}

impl PreferenceStore for SettingsFile {
    fn save(&mut self) -> Result<()> {
        write_json(&self.path, &Value::Object(self.values.clone()))
    }
}

/// Read a JSON object from `path`. `Ok(None)` when the file doesn't exist.
fn read_json_object(path: &Path) -> Result<Option<Map<String, Value>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if text.trim().is_empty() {
        return Ok(Some(Map::new()));
    }

    let value: Value = serde_json::from_str(&text).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(Error::Parse {
            path: path.to_path_buf(),
            source: serde::de::Error::custom("expected a JSON object at the top level"),
        }),
    }
}

/// Pretty-print `value` to `path`, creating parent directories as needed.
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut text = serde_json::to_string_pretty(value).map_err(|source| Error::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');

    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {}", path.display());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn map_treats_null_as_unset() {
        let mut map = Map::new();
        map.set("font_size", Value::Null);
        assert_eq!(Settings::get(&map, "font_size"), None);
        assert_eq!(map.get_or("font_size", json!(12)), json!(12));
    }

    #[test]
    fn update_merges_without_dropping_other_keys() {
        let mut map = json!({"font_face": "Menlo", "theme": "Dark"})
            .as_object()
            .cloned()
            .unwrap();
        let patch = json!({"font_face": "Consolas", "font_size": 13});
        map.update(patch.as_object().unwrap());

        assert_eq!(
            Value::Object(map),
            json!({"font_face": "Consolas", "theme": "Dark", "font_size": 13})
        );
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = SettingsFile::load(temp.path().join("Preferences.json")).unwrap();
        assert_eq!(store.get("font_face"), None);
    }

    #[test]
    fn save_round_trips_and_preserves_key_order() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("Preferences.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "Dark", "font_face": "Menlo"}"#).unwrap();

        let mut store = SettingsFile::load(&path).unwrap();
        store.set("font_size", json!(14));
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let theme = text.find("theme").unwrap();
        let face = text.find("font_face").unwrap();
        let size = text.find("font_size").unwrap();
        assert!(theme < face && face < size);
        assert!(text.ends_with('\n'));

        let reloaded = SettingsFile::load(&path).unwrap();
        assert_eq!(reloaded.get("font_size"), Some(json!(14)));
    }

    #[test]
    fn unserializable_value_is_not_written() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Layout.json");
        let mut bad = std::collections::BTreeMap::new();
        bad.insert(vec![1u8], 1);

        let err = write_json(&path, &bad).unwrap_err();
        assert!(matches!(err, Error::Serialize { .. }));
        assert!(err.to_string().starts_with("Failed to serialize"));
        assert!(!path.exists());
    }

    #[test]
    fn non_object_document_is_a_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("FontList.json");
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            SettingsFile::load(&path),
            Err(Error::Parse { .. })
        ));
    }
}
