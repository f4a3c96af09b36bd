// Line renderer
//
// Redraws the prompt line in place. Each redraw is one write of:
// carriage return, prompt, visible slice, erase-to-end-of-line, cursor
// column. When prompt plus text is wider than the terminal, the window
// scrolls horizontally so the cursor stays visible.

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

use super::line_buffer::LineBuffer;

const BELL: &[u8] = b"\x07";

/// Slice of the buffer that fits on screen, plus the cursor inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Offset of the first visible byte.
    pub start: usize,
    /// Number of visible bytes.
    pub len: usize,
    /// Cursor offset relative to `start`.
    pub cursor: usize,
}

/// Compute the visible window for a line of `len` bytes with the cursor at
/// `cursor`. A `width` of 0 means "unknown": the whole line is shown.
pub fn viewport(prompt_width: usize, width: usize, len: usize, cursor: usize) -> Viewport {
    if width == 0 {
        return Viewport {
            start: 0,
            len,
            cursor,
        };
    }
    let avail = width.saturating_sub(prompt_width);
    let start = cursor.saturating_sub(avail);
    Viewport {
        start,
        len: (len - start).min(avail),
        cursor: cursor - start,
    }
}

/// Draws the edited line to `out`; bells go to `alert`.
#[derive(Debug)]
pub struct Renderer<W: Write, A: Write> {
    out: W,
    alert: A,
    prompt: String,
    width: usize,
}

impl<W: Write, A: Write> Renderer<W, A> {
    pub fn new(out: W, alert: A, prompt: &str, width: u16) -> Self {
        Self {
            out,
            alert,
            prompt: prompt.to_string(),
            width: usize::from(width),
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }

    pub fn viewport(&self, buffer: &LineBuffer) -> Viewport {
        viewport(self.prompt.len(), self.width, buffer.len(), buffer.cursor())
    }

    /// Bytes of one full redraw of `buffer`.
    pub fn frame(&self, buffer: &LineBuffer) -> Vec<u8> {
        let view = self.viewport(buffer);
        let visible = &buffer.as_bytes()[view.start..view.start + view.len];
        let column = u16::try_from(self.prompt.len() + view.cursor)
            .unwrap_or(u16::MAX)
            .min(u16::MAX - 1);

        let mut frame = Vec::with_capacity(self.prompt.len() + visible.len() + 16);
        frame.push(b'\r');
        frame.extend_from_slice(self.prompt.as_bytes());
        frame.extend_from_slice(visible);
        // Writing into a Vec cannot fail.
        let _ = queue!(frame, Clear(ClearType::UntilNewLine), MoveToColumn(column));
        frame
    }

    /// Write the prompt once at the start of a session.
    pub fn start(&mut self) {
        let _ = self
            .out
            .write_all(self.prompt.as_bytes())
            .and_then(|()| self.out.flush());
    }

    /// Redraw the line. Write errors are ignored; the next redraw repairs
    /// the display.
    pub fn refresh(&mut self, buffer: &LineBuffer) {
        let frame = self.frame(buffer);
        let _ = self.out.write_all(&frame).and_then(|()| self.out.flush());
    }

    pub fn beep(&mut self) {
        let _ = self.alert.write_all(BELL).and_then(|()| self.alert.flush());
    }

    /// Move to a fresh line once the session is over. Output
    /// post-processing is off in raw mode, so both CR and LF are needed.
    pub fn finish(&mut self) {
        let _ = self.out.write_all(b"\r\n").and_then(|()| self.out.flush());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &[u8], cursor: usize) -> LineBuffer {
        let mut buffer = LineBuffer::new(4096);
        buffer.replace(text);
        while buffer.cursor() > cursor {
            buffer.move_left();
        }
        buffer
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    // ── viewport ───────────────────────────────────────────────────────────────

    #[test]
    fn test_viewport_fits_without_scrolling() {
        let view = viewport(5, 80, 10, 4);
        assert_eq!(
            view,
            Viewport {
                start: 0,
                len: 10,
                cursor: 4
            }
        );
    }

    #[test]
    fn test_viewport_scrolls_to_keep_cursor_visible() {
        // width 10, prompt "cmd> ", 20 bytes, cursor at the end
        let view = viewport(5, 10, 20, 20);
        assert_eq!(view.len, 5);
        assert_eq!(view.start, 15);
        assert_eq!(view.start + view.len, 20);
        assert_eq!(view.cursor, 5);
    }

    #[test]
    fn test_viewport_trims_tail_after_cursor() {
        let view = viewport(5, 10, 20, 2);
        assert_eq!(view.start, 0);
        assert_eq!(view.len, 5);
        assert_eq!(view.cursor, 2);
    }

    #[test]
    fn test_viewport_width_zero_shows_everything() {
        let view = viewport(5, 0, 300, 120);
        assert_eq!(
            view,
            Viewport {
                start: 0,
                len: 300,
                cursor: 120
            }
        );
    }

    #[test]
    fn test_viewport_prompt_wider_than_terminal() {
        let view = viewport(12, 10, 4, 4);
        assert_eq!(view.len, 0);
        assert_eq!(view.cursor, 0);
    }

    // ── frames ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_frame_layout() {
        let renderer = Renderer::new(Vec::new(), Vec::new(), "cmd> ", 80);
        let frame = renderer.frame(&line(b"help", 4));
        assert!(frame.starts_with(b"\rcmd> help"));
        assert!(contains(&frame, b"\x1b[K"));
        // crossterm columns are 1-based on the wire: prompt (5) + cursor (4) + 1
        assert!(frame.ends_with(b"\x1b[10G"));
    }

    #[test]
    fn test_frame_shows_trailing_window_when_scrolled() {
        let renderer = Renderer::new(Vec::new(), Vec::new(), "cmd> ", 10);
        let mut text = vec![b'x'; 15];
        text.extend_from_slice(b"abcde");
        let frame = renderer.frame(&line(&text, 20));
        assert!(frame.starts_with(b"\rcmd> abcde\x1b[K"));
    }

    #[test]
    fn test_refresh_writes_frame_and_beep_goes_to_alert() {
        let mut renderer = Renderer::new(Vec::new(), Vec::new(), "> ", 40);
        let buffer = line(b"ab", 2);
        renderer.refresh(&buffer);
        renderer.beep();
        assert_eq!(renderer.output(), &renderer.frame(&buffer));
        assert_eq!(renderer.alert().as_slice(), BELL);
    }

    #[test]
    fn test_start_writes_prompt_once() {
        let mut renderer = Renderer::new(Vec::new(), Vec::new(), "cmd> ", 40);
        renderer.start();
        assert_eq!(renderer.output().as_slice(), b"cmd> ");
    }
}
