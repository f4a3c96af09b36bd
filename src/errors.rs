// Error types
//
// Typed errors for the library layers. The binary wraps these in anyhow.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while switching the controlling terminal in or out of raw mode.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to read terminal attributes: {0}")]
    GetAttributes(#[source] nix::Error),

    #[error("failed to set terminal attributes: {0}")]
    SetAttributes(#[source] nix::Error),
}

/// Failures of a line-edit session that are not part of normal editing.
#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write history file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure returned by a command handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("the queue is NULL")]
    NoQueue,

    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),

    #[error("number must be greater than 0")]
    InvalidCount,
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("{} does not exist", .0.display())]
    ScriptMissing(PathBuf),

    #[error("open file {} failed: {source}", .path.display())]
    ScriptOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("command {0} is already registered")]
    DuplicateCommand(String),

    #[error("unknown command:{0}")]
    UnknownCommand(String),

    #[error("{name}: {source}")]
    CommandFailed {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("failed to read command: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_messages_match_console_output() {
        assert_eq!(CommandError::NoQueue.to_string(), "the queue is NULL");
        assert_eq!(
            CommandError::InvalidCount.to_string(),
            "number must be greater than 0"
        );
    }

    #[test]
    fn test_console_error_unknown_command_format() {
        let err = ConsoleError::UnknownCommand("frob".to_string());
        assert_eq!(err.to_string(), "unknown command:frob");
    }

    #[test]
    fn test_command_failed_names_the_command() {
        let err = ConsoleError::CommandFailed {
            name: "ih".to_string(),
            source: CommandError::InvalidCount,
        };
        assert_eq!(err.to_string(), "ih: number must be greater than 0");
    }
}
