//! The stored preset list and the operations that reorder it.
//!
//! Position 0 of the stored list is the most recently active font. Every
//! operation loads the list fresh from the history store, works on a
//! [`FontList`], and writes the result straight back.

use crate::error::Result;
use crate::font::FontRecord;
use crate::settings::{PreferenceStore, Settings};
use log::info;
use serde_json::Value;

/// Key of the preset array inside the history store.
pub const FONT_LIST_KEY: &str = "font_list";

/// Presets plus the index of the one matching the active font.
///
/// `selected` is always a valid index into `fonts`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontList {
    pub fonts: Vec<FontRecord>,
    pub selected: usize,
}

/// Normalize `entries` and find the first one contained in `active`. When
/// none matches, `active` itself is prepended and selected.
pub fn build(entries: &[Value], active: &FontRecord) -> FontList {
    let mut fonts = Vec::with_capacity(entries.len() + 1);
    let mut selected = None;

    for font in entries.iter().filter_map(FontRecord::from_entry) {
        if selected.is_none() && active.contains(&font) {
            selected = Some(fonts.len());
        }
        fonts.push(font);
    }

    let selected = match selected {
        Some(index) => index,
        None => {
            fonts.insert(0, active.clone());
            0
        }
    };

    FontList { fonts, selected }
}

/// Build the list from what `history` stores under [`FONT_LIST_KEY`].
pub fn load<S: Settings + ?Sized>(history: &S, active: &FontRecord) -> FontList {
    let entries = match history.get(FONT_LIST_KEY) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("Ignoring `{FONT_LIST_KEY}` because it is not an array: {other}");
            Vec::new()
        }
        None => Vec::new(),
    };
    build(&entries, active)
}

/// Write `fonts` back to `history` as the stored list.
pub fn store<S: Settings + ?Sized>(history: &mut S, fonts: &[FontRecord]) {
    let entries = fonts.iter().map(FontRecord::to_value).collect();
    history.set(FONT_LIST_KEY, Value::Array(entries));
}

impl FontList {
    /// Rotate so the record after the selection (before it, when `reverse`)
    /// lands at position 0. Wraps around at both ends.
    pub fn rotate(mut self, reverse: bool) -> Vec<FontRecord> {
        let n = self.fonts.len();
        if n == 0 {
            return self.fonts;
        }
        let start = if reverse {
            (self.selected + n - 1) % n
        } else {
            (self.selected + 1) % n
        };
        self.fonts.rotate_left(start);
        self.fonts
    }

    /// Move record `index` to the front. `None` when out of range.
    pub fn promote(mut self, index: usize) -> Option<Vec<FontRecord>> {
        if index >= self.fonts.len() {
            return None;
        }
        let font = self.fonts.remove(index);
        self.fonts.insert(0, font);
        Some(self.fonts)
    }
}

/// Advance the active font to the next (or previous) preset and persist
/// both stores. Returns the new active font.
pub fn advance(
    prefs: &mut dyn PreferenceStore,
    history: &mut dyn PreferenceStore,
    reverse: bool,
) -> Result<FontRecord> {
    let active = FontRecord::from_settings(&*prefs);
    let list = load(&*history, &active);
    let fonts = list.rotate(reverse);

    let next = fonts[0].clone();
    next.apply_to(prefs);
    store(&mut *history, &fonts);

    prefs.save()?;
    history.save()?;
    info!("Switched font to {}", next.details());
    Ok(next)
}
