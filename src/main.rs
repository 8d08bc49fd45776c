use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod font;
mod font_list;
mod picker;
mod settings;
mod timer;
pub(crate) mod tui;
mod workspace;

/// Cycle, preview and select editor font presets.
#[derive(Parser)]
#[command(name = "fontlist", version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Switch to the next font in the list.
    Next {
        /// Go to the previous font instead.
        #[arg(long)]
        reverse: bool,
    },

    /// Pick a font, previewing each one as it is highlighted.
    Pick {
        /// Select this list position directly instead of opening the picker.
        index: Option<usize>,
    },

    /// List the stored fonts, marking the active one.
    List,

    /// Show the font attributes of the focused surface.
    Show,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,

        /// Automatically install completions into your shell config.
        #[arg(long)]
        install: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        None => commands::help::run(),
        Some(Command::Next { reverse }) => commands::next::run(config, reverse),
        Some(Command::Pick { index }) => commands::pick::run(config, index),
        Some(Command::List) => commands::list::run(config),
        Some(Command::Show) => commands::show::run(config),
        Some(Command::Completions { shell, install }) => {
            commands::completions::run(shell, install);
        }
    }
}
