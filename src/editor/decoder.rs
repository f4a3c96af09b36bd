// Input decoder
//
// Turns raw terminal bytes into edit events, one byte at a time.
// Escape sequences handled:
//   ESC [ A/B/C/D   history prev/next, right, left
//   ESC [ H/F       home, end
//   ESC [ 3 ~       delete
//   ESC O H/F       home, end

use std::io::{self, Read};
use tracing::debug;

pub const CTRL_B: u8 = 2;
pub const CTRL_C: u8 = 3;
pub const CTRL_F: u8 = 6;
pub const TAB: u8 = 9;
pub const ENTER: u8 = 13;
pub const ESC: u8 = 27;
pub const BACKSPACE: u8 = 127;

/// A logical editing action decoded from the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditEvent {
    Insert(u8),
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    Backspace,
    Delete,
    HistoryPrev,
    HistoryNext,
    Complete,
    Accept,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Normal,
    EscapeSeen,
    CsiSeen,
    /// `ESC [` followed by a digit; waiting for the terminator.
    CsiExtended(u8),
    /// `ESC O`; the next byte selects home or end.
    Ss3Seen,
}

#[derive(Debug, Default)]
pub struct InputDecoder {
    state: DecoderState,
}

impl InputDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// True while part of an escape sequence has been consumed.
    pub fn is_mid_sequence(&self) -> bool {
        self.state != DecoderState::Normal
    }

    pub fn reset(&mut self) {
        self.state = DecoderState::Normal;
    }

    /// Feed one byte; returns the event it completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<EditEvent> {
        let (next, event) = match self.state {
            DecoderState::Normal => Self::normal(byte),
            DecoderState::EscapeSeen => match byte {
                b'[' => (DecoderState::CsiSeen, None),
                b'O' => (DecoderState::Ss3Seen, None),
                _ => (DecoderState::Normal, None),
            },
            DecoderState::CsiSeen => match byte {
                b'0'..=b'9' => (DecoderState::CsiExtended(byte), None),
                b'A' => (DecoderState::Normal, Some(EditEvent::HistoryPrev)),
                b'B' => (DecoderState::Normal, Some(EditEvent::HistoryNext)),
                b'C' => (DecoderState::Normal, Some(EditEvent::MoveRight)),
                b'D' => (DecoderState::Normal, Some(EditEvent::MoveLeft)),
                b'H' => (DecoderState::Normal, Some(EditEvent::MoveHome)),
                b'F' => (DecoderState::Normal, Some(EditEvent::MoveEnd)),
                _ => (DecoderState::Normal, None),
            },
            DecoderState::CsiExtended(digit) => match (digit, byte) {
                (b'3', b'~') => (DecoderState::Normal, Some(EditEvent::Delete)),
                _ => (DecoderState::Normal, None),
            },
            DecoderState::Ss3Seen => match byte {
                b'H' => (DecoderState::Normal, Some(EditEvent::MoveHome)),
                b'F' => (DecoderState::Normal, Some(EditEvent::MoveEnd)),
                _ => (DecoderState::Normal, None),
            },
        };
        self.state = next;
        event
    }

    fn normal(byte: u8) -> (DecoderState, Option<EditEvent>) {
        let event = match byte {
            CTRL_B => EditEvent::MoveLeft,
            CTRL_C => EditEvent::Cancel,
            CTRL_F => EditEvent::MoveRight,
            TAB => EditEvent::Complete,
            ENTER => EditEvent::Accept,
            BACKSPACE => EditEvent::Backspace,
            ESC => return (DecoderState::EscapeSeen, None),
            other => EditEvent::Insert(other),
        };
        (DecoderState::Normal, Some(event))
    }
}

/// One item of the decoded input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Event(EditEvent),
    /// The input closed between events.
    EndOfInput,
    /// The input closed in the middle of an escape sequence.
    TruncatedSequence,
}

/// Lazily decodes a byte stream into events.
///
/// Ends after yielding `EndOfInput` or `TruncatedSequence`. A read error in
/// the middle of an escape sequence drops the partial sequence and decoding
/// resumes; any other read error is yielded as `Err`.
#[derive(Debug)]
pub struct EventStream<R: Read> {
    reader: R,
    decoder: InputDecoder,
    finished: bool,
}

impl<R: Read> EventStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: InputDecoder::new(),
            finished: false,
        }
    }
}

impl<R: Read> Iterator for EventStream<R> {
    type Item = io::Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.finished = true;
                    let end = if self.decoder.is_mid_sequence() {
                        Decoded::TruncatedSequence
                    } else {
                        Decoded::EndOfInput
                    };
                    self.decoder.reset();
                    return Some(Ok(end));
                }
                Ok(_) => {
                    if let Some(event) = self.decoder.feed(byte[0]) {
                        return Some(Ok(Decoded::Event(event)));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if self.decoder.is_mid_sequence() => {
                    debug!("dropping partial escape sequence after read error: {}", e);
                    self.decoder.reset();
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
