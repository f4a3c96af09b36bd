// Console-wide constants
//
// Defaults for every configurable value. Import via
// `use crate::config::constants::*;`.

/// Prompt written before each interactive line.
pub const DEFAULT_PROMPT: &str = "cmd> ";

/// Longest line the editor accepts, in bytes.
pub const DEFAULT_MAX_LINE: usize = 4096;

/// Number of commands kept in history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// History file, relative to the working directory.
pub const DEFAULT_HISTORY_FILE: &str = ".history_cmd";

/// Tokens passed to a command handler, command name included.
pub const DEFAULT_MAX_ARGS: usize = 8;

/// Directory under the home directory holding `config.toml`.
pub const CONFIG_DIR: &str = ".interpreter";

pub const CONFIG_FILE: &str = "config.toml";

/// Shortest and longest string generated for `RAND`.
pub const RAND_MIN_LEN: usize = 5;
pub const RAND_MAX_LEN: usize = 10;
