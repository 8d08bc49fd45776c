use crate::error::Result;
use crate::font::FontRecord;
use crate::font_list;
use crossterm::style::Stylize;
use std::path::Path;

pub fn run(config_path: Option<&Path>) {
    if let Err(e) = run_inner(config_path) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(config_path: Option<&Path>) -> Result<()> {
    let (_, stores) = super::open_stores(config_path)?;
    let active = FontRecord::from_settings(&stores.prefs);
    let list = font_list::load(&stores.history, &active);

    for (i, font) in list.fonts.iter().enumerate() {
        let line = format!("{i:>3}  {}", font.label());
        if i == list.selected {
            println!("{} {}", line.green(), "✓".green());
        } else {
            println!("{line}");
        }
        println!("     {}", font.details().dark_grey());
    }
    Ok(())
}
