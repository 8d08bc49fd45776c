use crate::error::Result;
use crate::picker::PickerSession;
use crate::timer::TimerQueue;
use crate::tui::{self, SelectListener};
use crate::workspace::LayoutFile;
use std::path::Path;
use std::time::{Duration, Instant};

pub fn run(config_path: Option<&Path>, index: Option<usize>) {
    if let Err(e) = run_inner(config_path, index) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(config_path: Option<&Path>, index: Option<usize>) -> Result<()> {
    let (config, mut stores) = super::open_stores(config_path)?;
    let mut layout = LayoutFile::load(&config.layout)?;

    let mut session = PickerSession::open(&mut stores.prefs, &mut stores.history, &mut layout)
        .with_delay(config.preview_delay);

    let index = match index {
        Some(index) => index,
        None => {
            let items = session.items();
            let selected = session.selected();
            let choice = {
                let mut preview = Preview {
                    session: &mut session,
                    timers: TimerQueue::new(),
                };
                tui::select_font(
                    "Select font:",
                    &items,
                    selected,
                    "↑/↓ to preview, enter to select, esc to cancel",
                    &mut preview,
                )?
            };
            match choice {
                Some(index) => index,
                None => {
                    session.cancel();
                    return Ok(());
                }
            }
        }
    };

    let touched_surfaces = !session.overridden_surfaces().is_empty();
    let font = session.confirm(index)?;
    if touched_surfaces {
        layout.save()?;
    }

    let label = font.label();
    if !label.is_empty() {
        println!("Now using {label}.");
    }
    Ok(())
}

/// Feeds cursor moves from the list widget into the session's preview
/// debounce and fires previews once their delay has passed.
struct Preview<'s, 'a> {
    session: &'s mut PickerSession<'a>,
    timers: TimerQueue,
}

impl SelectListener for Preview<'_, '_> {
    fn highlight(&mut self, index: usize) {
        self.session.preview(index, &mut self.timers);
    }

    fn idle(&mut self) -> Option<Duration> {
        let now = Instant::now();
        for index in self.timers.take_due(now) {
            self.session.fire_preview(index);
        }
        self.timers.until_next(now)
    }

    fn status(&self) -> String {
        format!("Active: {}", self.session.live_font().details())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::testing::MemoryStore;
    use crate::settings::Settings;
    use crate::workspace::testing::MemoryWorkspace;
    use serde_json::json;
    use std::thread;

    const DELAY: Duration = Duration::from_millis(20);

    fn stores() -> (MemoryStore, MemoryStore) {
        (
            MemoryStore::with_values(json!({"font_face": "Menlo"})),
            MemoryStore::with_values(json!({"font_list": ["Menlo", "Consolas", "Hack"]})),
        )
    }

    #[test]
    fn nothing_fires_before_the_delay() {
        let (mut prefs, mut history) = stores();
        let mut workspace = MemoryWorkspace::default();
        let mut session =
            PickerSession::open(&mut prefs, &mut history, &mut workspace).with_delay(DELAY);
        let mut preview = Preview {
            session: &mut session,
            timers: TimerQueue::new(),
        };

        preview.highlight(1);
        let (wait, status) = tui::settle(&mut preview);
        assert!(wait.is_some_and(|wait| wait <= DELAY));
        assert_eq!(status, "Active: font_face: Menlo");
    }

    #[test]
    fn status_shows_preview_on_the_redraw_after_the_timer() {
        let (mut prefs, mut history) = stores();
        let mut workspace = MemoryWorkspace::default();
        let mut session =
            PickerSession::open(&mut prefs, &mut history, &mut workspace).with_delay(DELAY);
        let mut preview = Preview {
            session: &mut session,
            timers: TimerQueue::new(),
        };

        preview.highlight(1);
        thread::sleep(DELAY * 2);
        let (wait, status) = tui::settle(&mut preview);
        assert_eq!(wait, None);
        assert_eq!(status, "Active: font_face: Consolas");
    }

    #[test]
    fn only_the_last_highlight_is_previewed() {
        let mut prefs = MemoryStore::with_values(json!({"font_face": "Menlo"}));
        let mut history = MemoryStore::with_values(json!({
            "font_list": ["Menlo", "Consolas", {"font_face": "Hack", "word_wrap": true}]
        }));
        let mut workspace =
            MemoryWorkspace::with_surfaces(&[("notes.md", json!({"font_size": 20}))]);
        let mut session =
            PickerSession::open(&mut prefs, &mut history, &mut workspace).with_delay(DELAY);
        {
            let mut preview = Preview {
                session: &mut session,
                timers: TimerQueue::new(),
            };
            preview.highlight(2);
            preview.highlight(1);
            thread::sleep(DELAY * 2);
            assert_eq!(preview.idle(), None);
            // Hack would have left word_wrap behind.
            assert_eq!(preview.status(), "Active: font_face: Consolas");
        }
        session.cancel();

        assert_eq!(prefs.get("font_face"), Some(json!("Menlo")));
        assert_eq!(workspace.surface("notes.md"), json!({"font_size": 20}));
        assert_eq!(prefs.saves, 0);
    }
}
