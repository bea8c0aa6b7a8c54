use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::session::Settings;
use crate::store::DEFAULT_STORE;

/// Interactive todo list with colored tags.
/// `save`/`load` default to ./uluto.db or a path passed via --db.
#[derive(Parser)]
#[command(name = "uluto", version, about = "Ultimate Luto: an interactive todo list")]
pub struct Cli {
    /// Default SQLite save file for save, load and exit.
    #[arg(long, env = "ULUTO_DB", default_value = DEFAULT_STORE)]
    pub db: PathBuf,

    /// Print without colors.
    #[arg(long)]
    pub no_color: bool,

    /// Skip backing up a save file before overwriting it.
    #[arg(long)]
    pub no_backup: bool,

    #[command(subcommand)]
    pub command: Option<LaunchCommand>,
}

#[derive(Subcommand)]
pub enum LaunchCommand {
    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Session settings from the parsed flags and the environment.
    ///
    /// Colors are off when `--no-color` is given, `NO_COLOR` is set, or stdout
    /// is not a terminal.
    pub fn settings(&self) -> Settings {
        let color = !self.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal();
        Settings {
            store: self.db.clone(),
            color,
            backup: !self.no_backup,
        }
    }
}

/// Print a completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) {
    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
