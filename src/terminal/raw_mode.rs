// Raw mode via termios
//
// The captured attributes are restored on every exit path through
// RawModeGuard, including early returns and panics. Production code passes
// stdin; any terminal descriptor works.

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use std::os::fd::AsFd;
use tracing::{debug, warn};

use crate::errors::TerminalError;

/// Terminal attributes captured before entering raw mode.
#[derive(Debug, Clone)]
pub struct SavedState {
    original: Termios,
}

/// Switch `fd` to byte-at-a-time raw mode.
///
/// Canonical mode, echo, signal characters and input/output post-processing
/// are disabled; reads return after exactly one byte with no timeout. If
/// either the query or the update fails, the terminal is left untouched.
pub fn enable_raw_mode<F: AsFd>(fd: F) -> Result<SavedState, TerminalError> {
    let original = termios::tcgetattr(fd.as_fd()).map_err(TerminalError::GetAttributes)?;
    let raw = raw_attributes(&original);
    termios::tcsetattr(fd.as_fd(), SetArg::TCSAFLUSH, &raw)
        .map_err(TerminalError::SetAttributes)?;
    debug!("terminal switched to raw mode");
    Ok(SavedState { original })
}

/// Restore exactly the attributes captured by [`enable_raw_mode`].
pub fn disable_raw_mode<F: AsFd>(fd: F, saved: SavedState) -> Result<(), TerminalError> {
    termios::tcsetattr(fd.as_fd(), SetArg::TCSAFLUSH, &saved.original)
        .map_err(TerminalError::SetAttributes)?;
    debug!("terminal attributes restored");
    Ok(())
}

/// Width of the terminal in columns, or 0 when it cannot be determined.
///
/// Asks the kernel only; there is no environment or terminfo fallback.
pub fn terminal_width() -> u16 {
    crossterm::terminal::window_size()
        .map(|size| size.columns)
        .unwrap_or(0)
}

fn raw_attributes(original: &Termios) -> Termios {
    let mut raw = original.clone();
    // no break, no CR to NL, no parity check, no strip, no start/stop output control
    raw.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);
    raw.output_flags &= !OutputFlags::OPOST;
    raw.control_flags |= ControlFlags::CS8;
    raw.local_flags &= !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG);
    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
    raw
}

/// Scoped raw mode on `fd`: the saved attributes go back on drop.
#[derive(Debug)]
pub struct RawModeGuard<F: AsFd> {
    fd: F,
    saved: Option<SavedState>,
}

impl<F: AsFd> RawModeGuard<F> {
    pub fn acquire(fd: F) -> Result<Self, TerminalError> {
        let saved = enable_raw_mode(fd.as_fd())?;
        Ok(Self {
            fd,
            saved: Some(saved),
        })
    }

    /// Restore the terminal now and report failure to the caller.
    pub fn release(mut self) -> Result<(), TerminalError> {
        match self.saved.take() {
            Some(saved) => disable_raw_mode(self.fd.as_fd(), saved),
            None => Ok(()),
        }
    }
}

impl<F: AsFd> Drop for RawModeGuard<F> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            if let Err(e) = disable_raw_mode(self.fd.as_fd(), saved) {
                warn!("failed to restore terminal attributes: {}", e);
            }
        }
    }
}
