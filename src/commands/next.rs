use crate::error::Result;
use crate::font_list;
use std::path::Path;

pub fn run(config_path: Option<&Path>, reverse: bool) {
    if let Err(e) = run_inner(config_path, reverse) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(config_path: Option<&Path>, reverse: bool) -> Result<()> {
    let (_, mut stores) = super::open_stores(config_path)?;
    let font = font_list::advance(&mut stores.prefs, &mut stores.history, reverse)?;

    let label = font.label();
    if label.is_empty() {
        println!("Switched font: {}", font.details());
    } else {
        println!("Switched font to {label}.");
    }
    Ok(())
}
