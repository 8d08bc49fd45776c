//! Terminal widgets using crossterm.
//!
//! [`select_font`] is the list picker behind `fontlist pick`: arrow keys move
//! the cursor, Enter confirms, Esc cancels. It reports cursor moves to a
//! [`SelectListener`] and gives the listener a chance to run delayed work
//! between key presses, so previews fire while the widget waits for input.

use crate::error::Error;
use crate::picker::{ItemKind, PickItem};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyModifiers},
    style::{self, Stylize},
    terminal, ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};
use std::time::Duration;

// ── Helpers ──────────────────────────────────────────────────────────────

/// Enter raw mode and hide the cursor; returns a guard that restores state
/// when dropped.
struct RawGuard {
    cursor_hidden: bool,
}

impl RawGuard {
    fn enter(hide_cursor: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if hide_cursor {
            io::stdout().execute(cursor::Hide)?;
        }
        Ok(RawGuard {
            cursor_hidden: hide_cursor,
        })
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = io::stdout().execute(cursor::Show);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// Move to the beginning of the current line, then clear everything below
/// (inclusive). Use this before a full redraw.
fn move_to_start_and_clear(out: &mut impl Write) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
    Ok(())
}

/// Move up `n` lines from the current position.
fn move_up(out: &mut impl Write, n: u16) -> io::Result<()> {
    if n > 0 {
        out.queue(cursor::MoveUp(n))?;
    }
    Ok(())
}

/// Print the final "✔ prompt value" line after a widget confirms.
fn print_confirm(out: &mut impl Write, prompt: &str, value: &str) -> io::Result<()> {
    out.queue(style::Print(style::style("✔ ").green().bold()))?;
    out.queue(style::Print(style::style(prompt).bold()))?;
    out.queue(style::Print(" "))?;
    out.queue(style::Print(style::style(value).cyan()))?;
    out.queue(style::Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Print the final "✘ prompt (cancelled)" line after a widget is dismissed.
fn print_cancel(out: &mut impl Write, prompt: &str) -> io::Result<()> {
    out.queue(style::Print(style::style("✘ ").red().bold()))?;
    out.queue(style::Print(style::style(prompt).bold()))?;
    out.queue(style::Print(" "))?;
    out.queue(style::Print(style::style("(cancelled)").dark_grey()))?;
    out.queue(style::Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

// ── select_font ─────────────────────────────────────────────────────────

const VISIBLE_ROWS: usize = 8;

/// Callbacks from [`select_font`].
pub trait SelectListener {
    /// The cursor is now on `index` (also called once for the initial row).
    fn highlight(&mut self, index: usize);

    /// Run any work that became due. Returns how long the widget may block
    /// waiting for a key before calling again; `None` blocks indefinitely.
    fn idle(&mut self) -> Option<Duration>;

    /// Status line shown under the list.
    fn status(&self) -> String;
}

/// Single-select over `items` starting at `initial`.
///
/// Returns the chosen index, or `None` when the user pressed Esc or Ctrl-C.
pub fn select_font(
    prompt: &str,
    items: &[PickItem],
    initial: usize,
    help: &str,
    listener: &mut dyn SelectListener,
) -> Result<Option<usize>, Error> {
    select_font_inner(prompt, items, initial, help, listener).map_err(Error::Terminal)
}

fn select_font_inner(
    prompt: &str,
    items: &[PickItem],
    initial: usize,
    help: &str,
    listener: &mut dyn SelectListener,
) -> io::Result<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    let _guard = RawGuard::enter(true)?; // hide cursor for arrow-key nav
    let mut out = io::stdout();
    let mut cursor = initial.min(items.len() - 1);

    listener.highlight(cursor);
    let (mut wait, status) = settle(listener);
    let mut last_lines = render_list(&mut out, prompt, items, cursor, help, &status, 0)?;

    loop {
        let ready = match wait {
            Some(wait) => event::poll(wait)?,
            None => true,
        };

        if ready {
            if let Event::Key(key) = event::read()? {
                // Ctrl-C cancels instead of exiting so previews get rolled back.
                let interrupted = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');

                match key.code {
                    _ if interrupted => {
                        move_up(&mut out, last_lines)?;
                        move_to_start_and_clear(&mut out)?;
                        print_cancel(&mut out, prompt)?;
                        return Ok(None);
                    }
                    KeyCode::Esc => {
                        move_up(&mut out, last_lines)?;
                        move_to_start_and_clear(&mut out)?;
                        print_cancel(&mut out, prompt)?;
                        return Ok(None);
                    }
                    KeyCode::Enter => {
                        move_up(&mut out, last_lines)?;
                        move_to_start_and_clear(&mut out)?;
                        let item = &items[cursor];
                        let shown = if item.label.is_empty() {
                            &item.details
                        } else {
                            &item.label
                        };
                        print_confirm(&mut out, prompt, shown)?;
                        return Ok(Some(item.value));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        if cursor > 0 {
                            cursor -= 1;
                            listener.highlight(cursor);
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if cursor + 1 < items.len() {
                            cursor += 1;
                            listener.highlight(cursor);
                        }
                    }
                    KeyCode::Home => {
                        if cursor != 0 {
                            cursor = 0;
                            listener.highlight(cursor);
                        }
                    }
                    KeyCode::End => {
                        if cursor != items.len() - 1 {
                            cursor = items.len() - 1;
                            listener.highlight(cursor);
                        }
                    }
                    _ => {}
                }
            }
        }

        // Either a key arrived or a timer came due; redraw with fresh status.
        let (next_wait, status) = settle(listener);
        wait = next_wait;
        last_lines = render_list(&mut out, prompt, items, cursor, help, &status, last_lines)?;
    }
}

/// Run whatever work is due, then read the status line to draw. Also returns
/// how long the widget may wait for the next key.
pub(crate) fn settle(listener: &mut dyn SelectListener) -> (Option<Duration>, String) {
    let wait = listener.idle();
    (wait, listener.status())
}

/// First row to draw so `cursor` stays inside the visible window.
fn window_start(len: usize, cursor: usize) -> usize {
    if len <= VISIBLE_ROWS {
        return 0;
    }
    let half = VISIBLE_ROWS / 2;
    cursor.saturating_sub(half).min(len - VISIBLE_ROWS)
}

/// Render the picker. Returns the number of lines drawn so the next redraw
/// knows how far to move up.
fn render_list(
    out: &mut io::Stdout,
    prompt: &str,
    items: &[PickItem],
    cursor: usize,
    help: &str,
    status: &str,
    prev_lines: u16,
) -> io::Result<u16> {
    move_up(out, prev_lines)?;
    move_to_start_and_clear(out)?;

    out.queue(style::Print(style::style("? ").green().bold()))?;
    out.queue(style::Print(style::style(prompt).bold()))?;
    out.queue(style::Print("\r\n"))?;
    let mut lines: u16 = 1; // prompt line

    let start = window_start(items.len(), cursor);
    for (i, item) in items.iter().enumerate().skip(start).take(VISIBLE_ROWS) {
        let pointer = if i == cursor { "❯" } else { " " };
        let mark = if item.kind == ItemKind::Current { "✓" } else { " " };
        let label = format!("  {pointer} {mark} {}", item.label);

        if i == cursor {
            out.queue(style::Print(style::style(label).blue()))?;
        } else if item.kind == ItemKind::Current {
            out.queue(style::Print(style::style(label).green()))?;
        } else {
            out.queue(style::Print(label))?;
        }
        out.queue(style::Print(style::style(format!("  {}", item.details)).dark_grey()))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    if items.len() > VISIBLE_ROWS {
        let more = format!("  ({}/{})", cursor + 1, items.len());
        out.queue(style::Print(style::style(more).dark_grey()))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    if !status.is_empty() {
        out.queue(style::Print(style::style(format!("  {status}")).cyan()))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    if !help.is_empty() {
        out.queue(style::Print(style::style(format!("  {help}")).dark_grey()))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    out.flush()?;
    // Cursor is `lines` rows below the start (past all content).
    Ok(lines)
}
