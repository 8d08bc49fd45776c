pub fn run() {
    println!("fontlist — cycle, preview and select editor font presets");
    println!();
    println!("Usage: fontlist [--config <PATH>] <command>");
    println!();
    println!("Commands:");
    println!("  next         Switch to the next font (--reverse for the previous one)");
    println!("  pick         Pick a font interactively, or by list position");
    println!("  list         List the stored fonts");
    println!("  show         Show the font attributes of the focused surface");
    println!("  completions  Generate shell completions");
    println!();
    println!("Run `fontlist <command> --help` for more info on a command.");
}
