//! Optional `config.toml` telling fontlist where the settings files live.
//!
//! ```toml
//! [stores]
//! directory = "/home/me/.config/editor/User"
//! preferences = "Preferences.json"
//! font_list = "FontList.json"
//! layout = "Layout.json"
//!
//! [picker]
//! preview_delay_ms = 250
//! ```
//!
//! Every key is optional. Relative file names are resolved against
//! `directory`, which defaults to the config directory itself.

use crate::error::{Error, Result};
use crate::picker::PREVIEW_DELAY;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "fontlist";
const MAX_PREVIEW_DELAY_MS: i64 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub preferences: PathBuf,
    pub font_list: PathBuf,
    pub layout: PathBuf,
    pub preview_delay: Duration,
}

impl Config {
    /// Defaults rooted at `directory`.
    pub fn in_directory(directory: &Path) -> Self {
        Config {
            preferences: directory.join("Preferences.json"),
            font_list: directory.join("FontList.json"),
            layout: directory.join("Layout.json"),
            preview_delay: PREVIEW_DELAY,
        }
    }

    /// Load from `path`, or from the default location when `None`. A missing
    /// file gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_path(),
        };
        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::in_directory(&base));
            }
            Err(source) => return Err(Error::Read { path, source }),
        };

        Config::parse(&text, &base).map_err(|message| Error::Config { path, message })
    }

    /// Parse config text. Relative paths resolve against `base`.
    pub fn parse(text: &str, base: &Path) -> std::result::Result<Self, String> {
        let doc: toml_edit::DocumentMut = text.parse().map_err(|e| format!("{e}"))?;

        let directory = match get_str(&doc, "stores", "directory")? {
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        };
        let mut config = Config::in_directory(&directory);

        if let Some(name) = get_str(&doc, "stores", "preferences")? {
            config.preferences = directory.join(name);
        }
        if let Some(name) = get_str(&doc, "stores", "font_list")? {
            config.font_list = directory.join(name);
        }
        if let Some(name) = get_str(&doc, "stores", "layout")? {
            config.layout = directory.join(name);
        }

        if let Some(item) = doc.get("picker").and_then(|p| p.get("preview_delay_ms")) {
            let ms = item
                .as_integer()
                .ok_or_else(|| "`picker.preview_delay_ms` must be an integer".to_string())?;
            let clamped = ms.clamp(0, MAX_PREVIEW_DELAY_MS);
            if clamped != ms {
                warn!(
                    "Invalid preview_delay_ms {ms}, clamping to 0-{MAX_PREVIEW_DELAY_MS} range"
                );
            }
            config.preview_delay = Duration::from_millis(clamped as u64);
        }

        Ok(config)
    }
}

/// `~/.config/fontlist/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

fn get_str<'d>(
    doc: &'d toml_edit::DocumentMut,
    table: &str,
    key: &str,
) -> std::result::Result<Option<&'d str>, String> {
    match doc.get(table).and_then(|t| t.get(key)) {
        None => Ok(None),
        Some(item) => item
            .as_str()
            .map(Some)
            .ok_or_else(|| format!("`{table}.{key}` must be a string")),
    }
}
