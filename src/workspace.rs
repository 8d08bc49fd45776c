//! Visible editor surfaces and their local setting overrides.

use crate::error::{Error, Result};
use crate::settings::{write_json, Settings};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub type SurfaceId = String;

/// What the picker needs from the window it previews into.
pub trait Workspace {
    fn num_groups(&self) -> usize;

    /// The surface currently shown in `group`, if the group shows anything.
    fn active_surface_in_group(&self, group: usize) -> Option<SurfaceId>;

    /// Local overrides of a surface. These sit on top of the global
    /// preferences and are independent of them. `None` for a surface with no
    /// overrides on record.
    fn surface_settings(&mut self, id: &str) -> Option<&mut dyn Settings>;

    /// Active surface of every group that has one, in group order.
    fn visible_surfaces(&self) -> Vec<SurfaceId> {
        (0..self.num_groups())
            .filter_map(|group| self.active_surface_in_group(group))
            .collect()
    }
}

// ── Layout file ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub active: Option<SurfaceId>,
}

/// On-disk shape of the layout document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Layout {
    /// Group holding keyboard focus.
    #[serde(default)]
    pub focused: usize,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub surfaces: BTreeMap<SurfaceId, Map<String, Value>>,
}

/// A [`Workspace`] read from and written back to a JSON layout file.
#[derive(Debug)]
pub struct LayoutFile {
    path: PathBuf,
    layout: Layout,
}

impl LayoutFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let layout = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| Error::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist, assuming no open surfaces", path.display());
                Layout::default()
            }
            Err(source) => return Err(Error::Read { path, source }),
        };
        Ok(LayoutFile { path, layout })
    }

    pub fn save(&self) -> Result<()> {
        write_json(&self.path, &self.layout)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The surface in the focused group, if any.
    pub fn focused_surface(&self) -> Option<SurfaceId> {
        self.active_surface_in_group(self.layout.focused)
    }
}

impl Workspace for LayoutFile {
    fn num_groups(&self) -> usize {
        self.layout.groups.len()
    }

    fn active_surface_in_group(&self, group: usize) -> Option<SurfaceId> {
        self.layout.groups.get(group)?.active.clone()
    }

    fn surface_settings(&mut self, id: &str) -> Option<&mut dyn Settings> {
        self.layout
            .surfaces
            .get_mut(id)
            .map(|settings| settings as &mut dyn Settings)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_layout_has_no_surfaces() {
        let temp = tempfile::tempdir().unwrap();
        let layout = LayoutFile::load(temp.path().join("Layout.json")).unwrap();
        assert!(layout.visible_surfaces().is_empty());
        assert_eq!(layout.focused_surface(), None);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Layout.json");
        fs::write(
            &path,
            json!({
                "focused": 1,
                "groups": [{"active": "main.rs"}, {"active": null}, {"active": "lib.rs"}],
                "surfaces": {"main.rs": {"font_size": 14}}
            })
            .to_string(),
        )
        .unwrap();

        let layout = LayoutFile::load(&path).unwrap();
        assert_eq!(layout.num_groups(), 3);
        assert_eq!(layout.visible_surfaces(), ["main.rs", "lib.rs"]);
        assert_eq!(layout.focused_surface(), None);
    }

    #[test]
    fn surface_overrides_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Layout.json");
        fs::write(
            &path,
            r#"{"groups": [{"active": "notes.md"}], "surfaces": {"notes.md": {}}}"#,
        )
        .unwrap();

        let mut layout = LayoutFile::load(&path).unwrap();
        layout
            .surface_settings("notes.md")
            .unwrap()
            .set("font_face", json!("Iosevka"));
        layout.save().unwrap();

        let mut reloaded = LayoutFile::load(&path).unwrap();
        assert_eq!(reloaded.focused_surface().as_deref(), Some("notes.md"));
        let settings = reloaded.surface_settings("notes.md").unwrap();
        assert_eq!(settings.get("font_face"), Some(json!("Iosevka")));
    }
}
