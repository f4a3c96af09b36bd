// Configuration settings

use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::PathBuf;

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt written before each interactive line
    pub prompt: String,

    /// Longest accepted line in bytes
    pub max_line: usize,

    /// Commands kept in history
    pub history_capacity: usize,

    /// History file (relative paths resolve against the working directory)
    pub history_file: PathBuf,

    /// Tokens passed to a handler; extra tokens are dropped
    pub max_args: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_line: DEFAULT_MAX_LINE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            max_args: DEFAULT_MAX_ARGS,
        }
    }
}

impl Config {
    /// Reject limits the console cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_line == 0 {
            bail!("max_line must be greater than 0");
        }
        if self.history_capacity == 0 {
            bail!("history_capacity must be greater than 0");
        }
        if self.max_args == 0 {
            bail!("max_args must be greater than 0");
        }
        if self.history_file.as_os_str().is_empty() {
            bail!("history_file must not be empty");
        }
        Ok(())
    }
}
