// Edit session
//
// One call to read a line: feeds decoded events into the line buffer, the
// history cursor and the completion sub-mode, redrawing after each change.

use std::io::{self, Read, Write};
use tracing::debug;

use super::completion::CompletionEngine;
use super::decoder::{Decoded, EditEvent, EventStream};
use super::history::{Direction, HistoryCursor, HistoryStore, Recall};
use super::line_buffer::{Edit, LineBuffer};
use super::render::Renderer;

/// Whether Tab is cycling through command-name candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Insert,
    /// The buffer shows the candidate at `index`; `typed` is what the user
    /// had typed before the first Tab.
    Completing { typed: Vec<u8>, index: usize },
}

/// How an edit session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Enter was pressed; the raw (untrimmed) line.
    Accepted(Vec<u8>),
    /// Ctrl-C. Nothing is committed.
    Interrupted,
    /// The input closed between keystrokes.
    EndOfInput,
    /// The input closed inside an escape sequence.
    TruncatedSequence,
}

pub struct EditSession<'a, W: Write, A: Write> {
    buffer: LineBuffer,
    renderer: Renderer<W, A>,
    history: &'a HistoryStore,
    history_cursor: HistoryCursor,
    completion: &'a CompletionEngine,
    mode: EditorMode,
}

impl<'a, W: Write, A: Write> EditSession<'a, W, A> {
    pub fn new(
        renderer: Renderer<W, A>,
        max_line: usize,
        history: &'a HistoryStore,
        completion: &'a CompletionEngine,
    ) -> Self {
        Self {
            buffer: LineBuffer::new(max_line),
            renderer,
            history,
            history_cursor: HistoryCursor::default(),
            completion,
            mode: EditorMode::Insert,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn renderer(&self) -> &Renderer<W, A> {
        &self.renderer
    }

    /// Read events from `input` until the line is accepted or the session
    /// ends. The prompt is written first; a line break is written last.
    pub fn run<R: Read>(&mut self, input: R) -> io::Result<EditOutcome> {
        self.renderer.start();
        let outcome = self.drive(input);
        self.renderer.finish();
        outcome
    }

    fn drive<R: Read>(&mut self, input: R) -> io::Result<EditOutcome> {
        for decoded in EventStream::new(input) {
            match decoded? {
                Decoded::Event(event) => {
                    if let Some(outcome) = self.apply(event) {
                        return Ok(outcome);
                    }
                }
                Decoded::EndOfInput => return Ok(EditOutcome::EndOfInput),
                Decoded::TruncatedSequence => {
                    debug!("input closed inside an escape sequence");
                    return Ok(EditOutcome::TruncatedSequence);
                }
            }
        }
        Ok(EditOutcome::EndOfInput)
    }

    /// Apply one event; returns the outcome when it ends the session.
    pub fn apply(&mut self, event: EditEvent) -> Option<EditOutcome> {
        match event {
            EditEvent::Accept => {
                return Some(EditOutcome::Accepted(self.buffer.as_bytes().to_vec()));
            }
            EditEvent::Cancel => return Some(EditOutcome::Interrupted),
            EditEvent::Complete => self.complete(),
            EditEvent::HistoryPrev => self.navigate(Direction::Prev),
            EditEvent::HistoryNext => self.navigate(Direction::Next),
            EditEvent::Insert(byte) => {
                self.mode = EditorMode::Insert;
                let edit = self.buffer.insert(byte);
                self.signal(edit);
            }
            EditEvent::Backspace => {
                self.mode = EditorMode::Insert;
                let edit = self.buffer.backspace();
                self.signal(edit);
            }
            EditEvent::Delete => {
                self.mode = EditorMode::Insert;
                let edit = self.buffer.delete();
                self.signal(edit);
            }
            EditEvent::MoveLeft => {
                let edit = self.buffer.move_left();
                self.signal(edit);
            }
            EditEvent::MoveRight => {
                let edit = self.buffer.move_right();
                self.signal(edit);
            }
            EditEvent::MoveHome => {
                let edit = self.buffer.move_home();
                self.signal(edit);
            }
            EditEvent::MoveEnd => {
                let edit = self.buffer.move_end();
                self.signal(edit);
            }
        }
        None
    }

    fn signal(&mut self, edit: Edit) {
        match edit {
            Edit::Changed => self.renderer.refresh(&self.buffer),
            Edit::Rejected => self.renderer.beep(),
            Edit::Unchanged => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.mode = EditorMode::Insert;
        match self.history_cursor.step(self.history, direction) {
            Some(Recall::Entry(entry)) => self.buffer.replace(entry),
            Some(Recall::LiveInput) => self.buffer.clear(),
            None => {
                self.renderer.beep();
                return;
            }
        }
        self.renderer.refresh(&self.buffer);
    }

    fn complete(&mut self) {
        match std::mem::take(&mut self.mode) {
            EditorMode::Insert => {
                if !CompletionEngine::is_completable(self.buffer.as_bytes()) {
                    return;
                }
                let typed = self.buffer.as_bytes().to_vec();
                if let Some((index, name)) = self.completion.find_from(&typed, 0) {
                    self.buffer.replace(name.as_bytes());
                    self.mode = EditorMode::Completing { typed, index };
                }
            }
            EditorMode::Completing { typed, index } => {
                match self.completion.find_from(&typed, index + 1) {
                    Some((next, name)) => {
                        self.buffer.replace(name.as_bytes());
                        self.mode = EditorMode::Completing { typed, index: next };
                    }
                    None => self.buffer.replace(&typed),
                }
            }
        }
        self.renderer.refresh(&self.buffer);
    }
}
