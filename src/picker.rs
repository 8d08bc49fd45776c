//! Interactive font picking with live preview.
//!
//! A [`PickerSession`] is opened against the preference store, the preset
//! history and the workspace. While the user moves through the list the host
//! calls [`PickerSession::preview`]; the actual write happens later in
//! [`PickerSession::fire_preview`], once the scheduler's delay has passed,
//! and only for the most recently requested index. The session ends with
//! either [`PickerSession::confirm`] or [`PickerSession::cancel`], both of
//! which consume it.

use crate::error::{Error, Result};
use crate::font::FontRecord;
use crate::font_list::{self, FontList};
use crate::settings::PreferenceStore;
use crate::workspace::{SurfaceId, Workspace};
use log::{debug, info};
use std::collections::BTreeMap;
use std::time::Duration;

/// Delay between highlighting an entry and previewing it.
pub const PREVIEW_DELAY: Duration = Duration::from_millis(250);

/// Runs a preview for `index` once `delay` has elapsed.
///
/// There is no way to cancel a scheduled preview; superseded ones are
/// dropped by the session when they fire.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// The preset matching the active font when the session opened.
    Current,
    Other,
}

/// One row of the picker list.
#[derive(Debug, Clone, PartialEq)]
pub struct PickItem {
    pub label: String,
    pub value: usize,
    pub details: String,
    pub kind: ItemKind,
}

pub struct PickerSession<'a> {
    prefs: &'a mut dyn PreferenceStore,
    history: &'a mut dyn PreferenceStore,
    workspace: &'a mut dyn Workspace,
    /// Active font when the session opened.
    original: FontRecord,
    list: FontList,
    delay: Duration,
    last_previewed: Option<usize>,
    /// Surfaces with their own font overrides, with the overrides they had
    /// before any preview touched them. `None` until the first preview.
    overridden: Option<BTreeMap<SurfaceId, FontRecord>>,
}

impl<'a> PickerSession<'a> {
    pub fn open(
        prefs: &'a mut dyn PreferenceStore,
        history: &'a mut dyn PreferenceStore,
        workspace: &'a mut dyn Workspace,
    ) -> Self {
        let original = FontRecord::from_settings(&*prefs);
        let list = font_list::load(&*history, &original);
        debug!(
            "Opened picker with {} fonts, current is #{}",
            list.fonts.len(),
            list.selected
        );
        PickerSession {
            prefs,
            history,
            workspace,
            original,
            list,
            delay: PREVIEW_DELAY,
            last_previewed: None,
            overridden: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Index of the preset matching the active font.
    pub fn selected(&self) -> usize {
        self.list.selected
    }

    /// The font in the preference store right now, previews included.
    pub fn live_font(&self) -> FontRecord {
        FontRecord::from_settings(&*self.prefs)
    }

    pub fn items(&self) -> Vec<PickItem> {
        self.list
            .fonts
            .iter()
            .enumerate()
            .map(|(i, font)| PickItem {
                label: font.label(),
                value: i,
                details: font.details(),
                kind: if i == self.list.selected {
                    ItemKind::Current
                } else {
                    ItemKind::Other
                },
            })
            .collect()
    }

    /// The user highlighted `index`. Schedules the preview; any preview
    /// scheduled earlier becomes stale.
    pub fn preview(&mut self, index: usize, scheduler: &mut dyn Scheduler) {
        self.last_previewed = Some(index);
        scheduler.schedule(self.delay, index);
    }

    /// Run a scheduled preview. Returns whether anything was written.
    pub fn fire_preview(&mut self, index: usize) -> bool {
        if self.last_previewed != Some(index) {
            debug!("Dropping stale preview of #{index}");
            return false;
        }
        let Some(font) = self.list.fonts.get(index).cloned() else {
            return false;
        };
        if self.live_font().contains(&font) {
            return false;
        }

        debug!("Previewing {}", font.details());
        font.apply_to(&mut *self.prefs);
        self.track_overridden();

        if let Some(overridden) = &self.overridden {
            for id in overridden.keys() {
                if let Some(settings) = self.workspace.surface_settings(id) {
                    font.apply_to(settings);
                }
            }
        }
        true
    }

    /// Surfaces that have their own font overrides, tracked so far.
    pub fn overridden_surfaces(&self) -> Vec<SurfaceId> {
        self.overridden
            .as_ref()
            .map(|overridden| overridden.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot every visible surface whose font diverges from the original
    /// active font. A surface is snapshotted once; later previews never
    /// replace its snapshot.
    fn track_overridden(&mut self) {
        let overridden = self.overridden.get_or_insert_with(BTreeMap::new);
        for id in self.workspace.visible_surfaces() {
            if overridden.contains_key(&id) {
                continue;
            }
            let Some(settings) = self.workspace.surface_settings(&id) else {
                continue;
            };
            let local = FontRecord::from_settings(&*settings);
            if !self.original.contains(&local) {
                debug!("Surface {id} overrides the font: {}", local.details());
                overridden.insert(id, local);
            }
        }
    }

    /// Put every tracked surface back to the overrides it had before the
    /// session touched it, and forget the snapshots.
    pub fn reset_surfaces(&mut self) {
        let Some(overridden) = self.overridden.take() else {
            return;
        };
        for (id, original) in &overridden {
            if let Some(settings) = self.workspace.surface_settings(id) {
                original.restore_into(settings);
            }
        }
    }

    /// Make preset `index` the active font and move it to the front of the
    /// history. Previewed surfaces keep the confirmed font.
    ///
    /// The preset is merged in, not restored: attributes an earlier preview
    /// wrote that the chosen preset doesn't set stay in the preferences and
    /// on the previewed surfaces, and are saved with them.
    pub fn confirm(self, index: usize) -> Result<FontRecord> {
        let PickerSession {
            prefs,
            history,
            list,
            ..
        } = self;

        let fonts = list.promote(index).ok_or(Error::NoSuchFont(index))?;
        let font = fonts[0].clone();

        font.apply_to(&mut *prefs);
        font_list::store(&mut *history, &fonts);
        prefs.save()?;
        history.save()?;

        info!("Selected font {}", font.details());
        Ok(font)
    }

    /// Undo every preview: surfaces get their old overrides back and the
    /// preferences get the original active font. Nothing is saved.
    pub fn cancel(mut self) {
        self.reset_surfaces();
        self.original.restore_into(&mut *self.prefs);
        debug!("Picker cancelled, restored {}", self.original.details());
    }
}
