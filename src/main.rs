use std::io;

use clap::Parser;
use env_logger::Env;

use uluto::cli::{print_completions, Cli, LaunchCommand};
use uluto::console::Console;
use uluto::session::Session;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the REPL on stdout.
    env_logger::Builder::from_env(Env::default().filter_or("ULUTO_LOG", "warn")).init();

    if let Some(LaunchCommand::Completions { shell }) = cli.command {
        print_completions(shell);
        return;
    }

    let settings = cli.settings();
    log::debug!("starting with store {}", settings.store.display());

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), settings.color);
    let mut session = Session::new(settings, console);
    if let Err(e) = session.run() {
        eprintln!("uluto: {e}");
        std::process::exit(1);
    }
}
