// Console messages
//
// `show` output is printed only in verbose mode; every message that is
// shown or reported is also appended to the log file when one is set.

use chrono::NaiveDate;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

/// Marker written to the log file when the console starts.
pub const START_BANNER: &str = "=====start running =====";

/// `logYYYY-MM-DD` for the given day.
pub fn daily_log_name(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("log{}", date.format("%Y-%m-%d")))
}

pub struct MessageLog {
    visible: bool,
    log_file: Option<PathBuf>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl MessageLog {
    pub fn new(visible: bool, log_file: Option<PathBuf>) -> Self {
        Self::with_writers(
            visible,
            log_file,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    pub fn with_writers(
        visible: bool,
        log_file: Option<PathBuf>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Self {
            visible,
            log_file,
            out,
            err,
        }
    }

    /// Record the start banner in the log file only.
    pub fn start(&mut self) {
        self.append_to_log(START_BANNER);
    }

    /// Print `msg` if messages are visible; log it either way.
    pub fn show(&mut self, msg: &str) {
        if self.visible {
            write_line(&mut self.out, msg);
        }
        self.append_to_log(msg);
    }

    /// Print and log `msg` regardless of visibility.
    pub fn show_always(&mut self, msg: &str) {
        write_line(&mut self.out, msg);
        self.append_to_log(msg);
    }

    /// Print `msg` to the console without logging it.
    pub fn print(&mut self, msg: &str) {
        write_line(&mut self.out, msg);
    }

    /// Report a failure on stderr and in the log.
    pub fn error(&mut self, msg: &str) {
        write_line(&mut self.err, msg);
        self.append_to_log(msg);
    }

    fn append_to_log(&self, msg: &str) {
        let Some(path) = &self.log_file else {
            return;
        };
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", msg));
        if let Err(e) = result {
            warn!("failed to write log file {}: {}", path.display(), e);
        }
    }
}

fn write_line(out: &mut dyn Write, msg: &str) {
    let _ = writeln!(out, "{}", msg).and_then(|()| out.flush());
}

impl fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageLog")
            .field("visible", &self.visible)
            .field("log_file", &self.log_file)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::captured as messages;
    use std::fs;

    #[test]
    fn test_daily_log_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(daily_log_name(date), PathBuf::from("log2024-03-07"));
    }

    #[test]
    fn test_show_respects_visibility() {
        let (mut quiet, out, _) = messages(false, None);
        quiet.show("the size of queue is 0");
        assert_eq!(out.text(), "");

        let (mut verbose, out, _) = messages(true, None);
        verbose.show("the size of queue is 0");
        assert_eq!(out.text(), "the size of queue is 0\n");
    }

    #[test]
    fn test_show_always_and_error() {
        let (mut log, out, err) = messages(false, None);
        log.show_always("queue = []");
        log.error("unknown command:frob");
        assert_eq!(out.text(), "queue = []\n");
        assert_eq!(err.text(), "unknown command:frob\n");
    }

    #[test]
    fn test_log_file_receives_shown_messages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log2024-03-07");
        let (mut log, _, _) = messages(false, Some(path.clone()));

        log.start();
        log.show("new");
        log.print("# not logged");
        log.error("the queue is NULL");

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "=====start running =====\nnew\nthe queue is NULL\n"
        );
    }

    #[test]
    fn test_unwritable_log_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (mut log, out, _) = messages(true, Some(dir.path().join("missing").join("log")));
        log.show("still printed");
        assert_eq!(out.text(), "still printed\n");
    }
}
