use crate::error::{Error, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "fontlist";

pub fn run(shell: Shell, install: bool) {
    let mut cmd = crate::Cli::command();

    if !install {
        clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
        return;
    }

    if let Err(e) = install_completions(shell, &mut cmd) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Where completions for `shell` go under `home`, or `None` if auto-install
/// isn't supported for it.
fn completion_path(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Zsh => Some(home.join(".zfunc").join(format!("_{BIN_NAME}"))),
        Shell::Bash => Some(
            home.join(".local/share/bash-completion/completions")
                .join(BIN_NAME),
        ),
        Shell::Fish => Some(
            home.join(".config/fish/completions")
                .join(format!("{BIN_NAME}.fish")),
        ),
        _ => None,
    }
}

fn install_completions(shell: Shell, cmd: &mut clap::Command) -> Result<()> {
    let Some(home) = dirs::home_dir() else {
        eprintln!("Could not determine your home directory.");
        std::process::exit(1);
    };
    let Some(path) = completion_path(shell, &home) else {
        eprintln!(
            "Auto-install not supported for {shell:?}. \
             Use `{BIN_NAME} completions {shell:?}` to print completions and install manually."
        );
        std::process::exit(1);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut buf = Vec::new();
    clap_complete::generate(shell, cmd, BIN_NAME, &mut buf);
    fs::write(&path, buf).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    println!("Installed {shell:?} completions to {}", path.display());

    if shell == Shell::Zsh {
        ensure_zsh_fpath(&home.join(".zshrc"))?;
        println!("Restart your shell or run: source ~/.zshrc");
    } else if shell == Shell::Bash {
        println!("Restart your shell to activate.");
    }
    Ok(())
}

/// Make sure `~/.zfunc` is on zsh's `fpath`.
fn ensure_zsh_fpath(zshrc: &Path) -> Result<()> {
    let existing = fs::read_to_string(zshrc).unwrap_or_default();
    if existing.contains(".zfunc") {
        return Ok(());
    }

    let snippet = "\n# fontlist shell completions\nfpath=(~/.zfunc $fpath)\nautoload -Uz compinit && compinit\n";
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(zshrc)
        .and_then(|mut file| file.write_all(snippet.as_bytes()))
        .map_err(|source| Error::Write {
            path: zshrc.to_path_buf(),
            source,
        })?;
    println!("Added fpath + compinit to ~/.zshrc");
    Ok(())
}
