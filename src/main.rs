use std::io;

use log::error;
use steepest::cli::Console;
use steepest::runner::{Runner, RunnerOptions};

fn main() {
    env_logger::init();

    let mut options = RunnerOptions::default();
    options.set_summary(std::env::args().skip(1).any(|arg| arg == "--summary"));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::with_runner(stdin.lock(), stdout.lock(), Runner::with_options(options));

    // The process exits with status 0 even when the session fails.
    if let Err(error) = console.run() {
        error!("session ended: {}", error);
    }
}
