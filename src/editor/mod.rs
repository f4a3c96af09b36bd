// Interactive line editor
//
// Raw-mode line editing with in-place redraw, history navigation and
// command-name completion.

mod completion;
mod decoder;
mod history;
mod line_buffer;
mod render;
mod session;

pub use completion::CompletionEngine;
pub use decoder::{Decoded, DecoderState, EditEvent, EventStream, InputDecoder};
pub use history::{Direction, HistoryCursor, HistoryStore, Recall};
pub use line_buffer::{Edit, LineBuffer};
pub use render::{viewport, Renderer, Viewport};
pub use session::{EditOutcome, EditSession, EditorMode};

use std::io;

use crate::errors::EditError;
use crate::terminal::{terminal_width, RawModeGuard};

/// Settings for one interactive line read.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub prompt: String,
    pub max_line: usize,
}

/// Read one line from the controlling terminal.
///
/// Stdin is switched to raw mode for the duration of the call and restored
/// on every exit path. Bells go to stderr.
pub fn read_line(
    options: &EditorOptions,
    history: &HistoryStore,
    completion: &CompletionEngine,
) -> Result<EditOutcome, EditError> {
    let guard = RawModeGuard::acquire(io::stdin())?;
    let renderer = Renderer::new(io::stdout(), io::stderr(), &options.prompt, terminal_width());
    let mut session = EditSession::new(renderer, options.max_line, history, completion);
    let outcome = session.run(io::stdin().lock());
    guard.release()?;
    Ok(outcome?)
}
