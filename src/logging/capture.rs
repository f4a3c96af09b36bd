// In-memory writer shared between a MessageLog and the test inspecting it.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use super::MessageLog;

#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A message log writing into two captures: (log, stdout, stderr).
pub fn captured(visible: bool, log_file: Option<std::path::PathBuf>) -> (MessageLog, Capture, Capture) {
    let out = Capture::default();
    let err = Capture::default();
    let log = MessageLog::with_writers(visible, log_file, Box::new(out.clone()), Box::new(err.clone()));
    (log, out, err)
}
