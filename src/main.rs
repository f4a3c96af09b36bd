// Interpreter - queue console entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use interpreter::cli::{Console, InputSource, RunOutcome};
use interpreter::config::load_config;
use interpreter::logging::{daily_log_name, init_tracing, MessageLog};

/// Exit status after Ctrl-C at the prompt (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "interpreter", version, about = "Queue console with line editing and history")]
struct Cli {
    /// Read commands from FILE instead of the terminal
    #[arg(short = 'f', value_name = "FILE")]
    file: Option<PathBuf>,

    /// Echo commands and show queue messages
    #[arg(short = 'v')]
    verbose: bool,

    /// Append messages to a log file named logYYYY-MM-DD
    #[arg(short = 'l')]
    log: bool,

    /// Configuration file (default: ~/.interpreter/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut console = match build_console(&cli) {
        Ok(console) => console,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match console.run(InputSource::detect(cli.file)) {
        Ok(RunOutcome::Finished) => ExitCode::SUCCESS,
        Ok(RunOutcome::Interrupted) => ExitCode::from(EXIT_INTERRUPTED),
        Err(e) => {
            console.context_mut().messages.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn build_console(cli: &Cli) -> Result<Console> {
    let config = load_config(cli.config.as_deref())?;
    let log_file = cli
        .log
        .then(|| daily_log_name(chrono::Local::now().date_naive()));
    let messages = MessageLog::new(cli.verbose, log_file);
    Console::new(config, messages).context("Failed to start console")
}
