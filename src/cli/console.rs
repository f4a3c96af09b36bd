// Console run loop
//
// Reads command lines from a batch file, the interactive editor or plain
// stdin, and feeds them to the dispatcher until input ends or `quit`.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::builtins::register_builtins;
use super::commands::CommandTable;
use super::dispatcher::dispatch;
use crate::config::Config;
use crate::editor::{self, CompletionEngine, EditOutcome, EditorOptions, HistoryStore};
use crate::errors::ConsoleError;
use crate::logging::MessageLog;
use crate::queue::StringQueue;

/// Everything a command handler may touch.
#[derive(Debug)]
pub struct ConsoleContext {
    pub config: Config,
    pub commands: CommandTable,
    pub history: HistoryStore,
    pub messages: MessageLog,
    /// `None` until `new` creates a queue and again after `free`.
    pub queue: Option<StringQueue>,
    /// Set by `quit`; the run loop stops before reading another line.
    pub quit: bool,
    pub rng: SmallRng,
}

impl ConsoleContext {
    /// A context with an empty command table and empty history.
    pub fn new(config: Config, messages: MessageLog) -> Self {
        let history = HistoryStore::new(config.history_capacity);
        Self {
            config,
            commands: CommandTable::new(),
            history,
            messages,
            queue: None,
            quit: false,
            rng: SmallRng::from_entropy(),
        }
    }
}

/// Where command lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Batch file given with `-f`. Any failure ends the run.
    Script(PathBuf),
    /// Controlling terminal, read through the line editor.
    Terminal,
    /// Non-terminal stdin (a pipe or a redirected file).
    Stdin,
}

impl InputSource {
    pub fn detect(script: Option<PathBuf>) -> Self {
        match script {
            Some(path) => InputSource::Script(path),
            None if io::stdin().is_terminal() => InputSource::Terminal,
            None => InputSource::Stdin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Input ended or `quit` was run.
    Finished,
    /// The user pressed Ctrl-C at the prompt.
    Interrupted,
}

#[derive(Debug)]
pub struct Console {
    ctx: ConsoleContext,
}

impl Console {
    /// Build the console with the built-in command set and the persisted
    /// history loaded.
    pub fn new(config: Config, messages: MessageLog) -> Result<Self, ConsoleError> {
        let mut ctx = ConsoleContext::new(config, messages);
        register_builtins(&mut ctx.commands)?;
        if let Err(e) = ctx.history.load(&ctx.config.history_file) {
            warn!("{}", e);
        }
        Ok(Self { ctx })
    }

    pub fn context(&self) -> &ConsoleContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ConsoleContext {
        &mut self.ctx
    }

    pub fn run(&mut self, source: InputSource) -> Result<RunOutcome, ConsoleError> {
        self.ctx.messages.start();
        let outcome = match source {
            InputSource::Script(path) => self.run_script(&path),
            InputSource::Terminal => self.run_terminal(),
            InputSource::Stdin => self.run_lines(io::stdin().lock(), false),
        };
        self.shutdown();
        outcome
    }

    /// Run every line of `path`; the first failing line ends the run.
    pub fn run_script(&mut self, path: &Path) -> Result<RunOutcome, ConsoleError> {
        if !path.exists() {
            return Err(ConsoleError::ScriptMissing(path.to_path_buf()));
        }
        let file = File::open(path).map_err(|source| ConsoleError::ScriptOpen {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("running commands from {}", path.display());
        self.run_lines(BufReader::new(file), true)
    }

    /// Run lines from `reader` until it ends or `quit` is run.
    ///
    /// With `batch` set, the first error is returned; otherwise errors are
    /// reported and the loop continues.
    pub fn run_lines<R: BufRead>(&mut self, mut reader: R, batch: bool) -> Result<RunOutcome, ConsoleError> {
        let mut raw = Vec::new();
        while !self.ctx.quit {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            match self.handle_line(&raw, false) {
                Ok(()) => {}
                Err(e) if batch => return Err(e),
                Err(e) => self.ctx.messages.error(&e.to_string()),
            }
        }
        Ok(RunOutcome::Finished)
    }

    fn run_terminal(&mut self) -> Result<RunOutcome, ConsoleError> {
        let options = EditorOptions {
            prompt: self.ctx.config.prompt.clone(),
            max_line: self.ctx.config.max_line,
        };
        while !self.ctx.quit {
            let completion = CompletionEngine::new(self.ctx.commands.names());
            let line = match editor::read_line(&options, &self.ctx.history, &completion)? {
                EditOutcome::Accepted(bytes) => bytes,
                EditOutcome::Interrupted => return Ok(RunOutcome::Interrupted),
                EditOutcome::EndOfInput | EditOutcome::TruncatedSequence => break,
            };
            if let Err(e) = self.handle_line(&line, true) {
                self.ctx.messages.error(&e.to_string());
            }
        }
        Ok(RunOutcome::Finished)
    }

    /// Process one raw input line.
    ///
    /// Blank lines are skipped and `#` lines are echoed as-is. Anything else
    /// is shown, optionally recorded in history byte for byte, then
    /// dispatched.
    pub fn handle_line(&mut self, raw: &[u8], record: bool) -> Result<(), ConsoleError> {
        let bytes = trim_bytes(raw);
        if bytes.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(bytes);
        if line.starts_with('#') {
            self.ctx.messages.print(&line);
            return Ok(());
        }

        self.ctx.messages.show(&line);
        if record {
            self.record(bytes);
        }
        dispatch(&mut self.ctx, &line)
    }

    fn record(&mut self, line: &[u8]) {
        if !self.ctx.history.append(line) {
            return;
        }
        if let Err(e) = self.ctx.history.persist(&self.ctx.config.history_file) {
            warn!("{}", e);
        }
    }

    /// Release the queue. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.ctx.queue.take().is_some() {
            debug!("queue released at shutdown");
        }
    }
}

fn trim_bytes(raw: &[u8]) -> &[u8] {
    let start = raw
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(raw.len());
    let end = raw
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &raw[start..end]
}
