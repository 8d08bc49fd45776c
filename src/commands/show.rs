use crate::error::Result;
use crate::font::{display_value, FontRecord, ATTRIBUTES};
use crate::settings::Settings;
use crate::workspace::{LayoutFile, Workspace};
use std::path::Path;

pub fn run(config_path: Option<&Path>) {
    if let Err(e) = run_inner(config_path) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(config_path: Option<&Path>) -> Result<()> {
    let (config, stores) = super::open_stores(config_path)?;
    let mut layout = LayoutFile::load(&config.layout)?;

    let font = effective_font(&stores.prefs, &mut layout);
    println!("{}", describe(&font));
    Ok(())
}

/// Global font with the focused surface's overrides laid on top.
fn effective_font(prefs: &dyn Settings, layout: &mut LayoutFile) -> FontRecord {
    let mut font = FontRecord::from_settings(prefs);
    if let Some(id) = layout.focused_surface() {
        log::debug!("Showing font of surface {id} in {}", layout.path().display());
        if let Some(settings) = layout.surface_settings(&id) {
            FontRecord::from_settings(&*settings).apply_to(&mut font);
        }
    }
    font
}

/// One `name: value` line per attribute, `None` for unset ones.
fn describe(font: &FontRecord) -> String {
    ATTRIBUTES
        .iter()
        .map(|&key| match font.get(key) {
            Some(value) => format!("{key}: {}", display_value(value)),
            None => format!("{key}: None"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
