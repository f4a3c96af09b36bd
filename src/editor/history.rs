// Command history
//
// Bounded, chronologically ordered list of accepted commands. Immediate
// repeats are dropped and the oldest entry is evicted when full. The file
// format is one command per line.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::Path;
use tracing::debug;

use crate::errors::HistoryError;

/// Owner read/write only.
const HISTORY_FILE_MODE: u32 = 0o600;

#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<Vec<u8>>,
    capacity: usize,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.entries.iter().map(Vec::as_slice)
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.entries.back().map(Vec::as_slice)
    }

    /// Entry `offset` steps back from the newest (1 = newest).
    pub fn back(&self, offset: usize) -> Option<&[u8]> {
        if offset == 0 || offset > self.entries.len() {
            return None;
        }
        self.entries
            .get(self.entries.len() - offset)
            .map(Vec::as_slice)
    }

    /// Append `cmd` unless it repeats the newest entry.
    ///
    /// Returns whether the entry was added.
    pub fn append(&mut self, cmd: impl AsRef<[u8]>) -> bool {
        let cmd = cmd.as_ref();
        if self.last() == Some(cmd) {
            return false;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(cmd.to_vec());
        true
    }

    /// Load `path` line by line through [`append`](Self::append).
    ///
    /// A missing file is an empty history. Each line is cut at its first CR
    /// or LF. Returns the number of lines read.
    pub fn load(&mut self, path: &Path) -> Result<usize, HistoryError> {
        let load_err = |source| HistoryError::Load {
            path: path.to_path_buf(),
            source,
        };
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no history file at {}", path.display());
                return Ok(0);
            }
            Err(e) => return Err(load_err(e)),
        };

        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut count = 0;
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(load_err)? == 0 {
                break;
            }
            let end = line
                .iter()
                .position(|&b| b == b'\r' || b == b'\n')
                .unwrap_or(line.len());
            self.append(&line[..end]);
            count += 1;
        }
        debug!("loaded {} history lines from {}", count, path.display());
        Ok(count)
    }

    /// Overwrite `path` with one entry per line, readable by the owner only.
    pub fn persist(&self, path: &Path) -> Result<(), HistoryError> {
        let persist_err = |source| HistoryError::Persist {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(HISTORY_FILE_MODE)
            .open(path)
            .map_err(persist_err)?;
        // The creation mode is filtered by the umask and ignored for existing files.
        file.set_permissions(fs::Permissions::from_mode(HISTORY_FILE_MODE))
            .map_err(persist_err)?;

        let mut writer = BufWriter::new(file);
        for entry in &self.entries {
            writer.write_all(entry).map_err(persist_err)?;
            writer.write_all(b"\n").map_err(persist_err)?;
        }
        writer.flush().map_err(persist_err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// What the line should show after a history step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'h> {
    Entry(&'h [u8]),
    /// Stepped forward past the newest entry.
    LiveInput,
}

/// Navigation position inside the history during one edit session.
///
/// Offset 0 is live input; offset n shows the n-th newest entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryCursor {
    offset: usize,
}

impl HistoryCursor {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move one step, or `None` when the move runs off either end (the
    /// caller rings the bell).
    pub fn step<'h>(&mut self, history: &'h HistoryStore, direction: Direction) -> Option<Recall<'h>> {
        match direction {
            Direction::Prev => {
                if self.offset >= history.len() {
                    return None;
                }
                self.offset += 1;
                history.back(self.offset).map(Recall::Entry)
            }
            Direction::Next => {
                if self.offset == 0 {
                    return None;
                }
                self.offset -= 1;
                if self.offset == 0 {
                    Some(Recall::LiveInput)
                } else {
                    history.back(self.offset).map(Recall::Entry)
                }
            }
        }
    }
}
