pub mod completions;
pub mod help;
pub mod list;
pub mod next;
pub mod pick;
pub mod show;

use crate::config::Config;
use crate::error::Result;
use crate::settings::SettingsFile;
use std::path::Path;

/// The two settings documents every font command works on.
pub(crate) struct Stores {
    pub prefs: SettingsFile,
    pub history: SettingsFile,
}

/// Load the config, then the preference and font list stores it points at.
pub(crate) fn open_stores(config_path: Option<&Path>) -> Result<(Config, Stores)> {
    let config = Config::load(config_path)?;
    let prefs = SettingsFile::load(&config.preferences)?;
    let history = SettingsFile::load(&config.font_list)?;
    log::debug!(
        "Using preferences {} and font list {}",
        prefs.path().display(),
        history.path().display()
    );
    Ok((config, Stores { prefs, history }))
}
