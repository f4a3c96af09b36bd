// Line buffer
//
// Owned byte buffer with a cursor, bounded by the maximum line length.
// Offsets are byte offsets; there is no Unicode-aware cursor math.

/// What an edit did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Content or cursor moved; the line needs a redraw.
    Changed,
    /// Nothing happened and nothing should be signalled.
    Unchanged,
    /// The edit is not possible here; ring the bell.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: Vec<u8>,
    cursor: usize,
    max_len: usize,
}

impl LineBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: Vec::with_capacity(max_len.min(256)),
            cursor: 0,
            max_len,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.text.len() >= self.max_len
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Insert `byte` at the cursor. A full buffer silently ignores input.
    pub fn insert(&mut self, byte: u8) -> Edit {
        if self.is_full() {
            return Edit::Unchanged;
        }
        self.text.insert(self.cursor, byte);
        self.cursor += 1;
        Edit::Changed
    }

    /// Remove the byte before the cursor.
    pub fn backspace(&mut self) -> Edit {
        if self.cursor == 0 {
            return Edit::Rejected;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
        Edit::Changed
    }

    /// Remove the byte under the cursor. Only valid strictly inside the line.
    pub fn delete(&mut self) -> Edit {
        if self.cursor == 0 || self.cursor >= self.text.len() {
            return Edit::Rejected;
        }
        self.text.remove(self.cursor);
        Edit::Changed
    }

    pub fn move_left(&mut self) -> Edit {
        if self.cursor == 0 {
            return Edit::Rejected;
        }
        self.cursor -= 1;
        Edit::Changed
    }

    pub fn move_right(&mut self) -> Edit {
        if self.cursor >= self.text.len() {
            return Edit::Rejected;
        }
        self.cursor += 1;
        Edit::Changed
    }

    pub fn move_home(&mut self) -> Edit {
        if self.cursor == 0 {
            return Edit::Unchanged;
        }
        self.cursor = 0;
        Edit::Changed
    }

    pub fn move_end(&mut self) -> Edit {
        if self.cursor == self.text.len() {
            return Edit::Unchanged;
        }
        self.cursor = self.text.len();
        Edit::Changed
    }

    /// Replace the whole content and park the cursor at the end.
    ///
    /// Content longer than the maximum line length is truncated.
    pub fn replace(&mut self, content: &[u8]) {
        let keep = content.len().min(self.max_len);
        self.text.clear();
        self.text.extend_from_slice(&content[..keep]);
        self.cursor = keep;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn buffer_with(text: &[u8], max_len: usize) -> LineBuffer {
        let mut buffer = LineBuffer::new(max_len);
        buffer.replace(text);
        buffer
    }

    fn assert_invariant(buffer: &LineBuffer) {
        assert!(buffer.cursor() <= buffer.len());
        assert!(buffer.len() <= buffer.max_len());
    }

    // ── insertion ──────────────────────────────────────────────────────────────

    #[test]
    fn test_insert_at_tail() {
        let mut buffer = LineBuffer::new(16);
        for &b in b"new" {
            assert_eq!(buffer.insert(b), Edit::Changed);
        }
        assert_eq!(buffer.as_bytes(), b"new");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_insert_in_the_middle_shifts_tail_right() {
        let mut buffer = buffer_with(b"hlp", 16);
        buffer.move_left();
        buffer.move_left();
        buffer.insert(b'e');
        assert_eq!(buffer.as_bytes(), b"help");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_insert_into_full_buffer_is_ignored() {
        let mut buffer = buffer_with(b"abcd", 4);
        assert!(buffer.is_full());
        assert_eq!(buffer.insert(b'e'), Edit::Unchanged);
        assert_eq!(buffer.as_bytes(), b"abcd");
        assert_eq!(buffer.cursor(), 4);
    }

    // ── removal ────────────────────────────────────────────────────────────────

    #[test]
    fn test_backspace_round_trip_returns_to_empty() {
        let mut buffer = LineBuffer::new(64);
        let text = b"it RAND 3";
        for &b in text {
            buffer.insert(b);
        }
        for _ in 0..text.len() {
            assert_eq!(buffer.backspace(), Edit::Changed);
        }
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.backspace(), Edit::Rejected);
    }

    #[test]
    fn test_backspace_in_the_middle() {
        let mut buffer = buffer_with(b"heelp", 16);
        buffer.move_left();
        buffer.move_left();
        assert_eq!(buffer.backspace(), Edit::Changed);
        assert_eq!(buffer.as_bytes(), b"help");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_delete_removes_byte_under_cursor() {
        let mut buffer = buffer_with(b"helxp", 16);
        buffer.move_left();
        buffer.move_left();
        assert_eq!(buffer.delete(), Edit::Changed);
        assert_eq!(buffer.as_bytes(), b"help");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_delete_rejected_at_either_end() {
        let mut buffer = buffer_with(b"abc", 16);
        assert_eq!(buffer.delete(), Edit::Rejected);
        buffer.move_home();
        assert_eq!(buffer.delete(), Edit::Rejected);
        assert_eq!(buffer.as_bytes(), b"abc");
    }

    // ── movement ───────────────────────────────────────────────────────────────

    #[test]
    fn test_moves_reject_out_of_bounds() {
        let mut buffer = buffer_with(b"ab", 16);
        assert_eq!(buffer.move_right(), Edit::Rejected);
        buffer.move_home();
        assert_eq!(buffer.move_left(), Edit::Rejected);
        assert_eq!(buffer.move_right(), Edit::Changed);
        assert_eq!(buffer.cursor(), 1);
    }

    #[test]
    fn test_move_home_at_start_is_a_no_op() {
        let mut buffer = buffer_with(b"abc", 16);
        buffer.move_home();
        let before = buffer.clone();
        assert_eq!(buffer.move_home(), Edit::Unchanged);
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_move_end_from_start() {
        let mut buffer = buffer_with(b"abc", 16);
        buffer.move_home();
        assert_eq!(buffer.move_end(), Edit::Changed);
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.move_end(), Edit::Unchanged);
    }

    #[test]
    fn test_replace_truncates_to_max_len() {
        let mut buffer = LineBuffer::new(3);
        buffer.replace(b"history");
        assert_eq!(buffer.as_bytes(), b"his");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_random_edit_sequences_keep_cursor_in_range() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut buffer = LineBuffer::new(rng.gen_range(1..12));
            for _ in 0..64 {
                match rng.gen_range(0..7) {
                    0 | 1 => buffer.insert(rng.gen_range(b'a'..=b'z')),
                    2 => buffer.backspace(),
                    3 => buffer.delete(),
                    4 => buffer.move_left(),
                    5 => buffer.move_right(),
                    _ => {
                        if rng.gen_bool(0.5) {
                            buffer.move_home()
                        } else {
                            buffer.move_end()
                        }
                    }
                };
                assert_invariant(&buffer);
            }
        }
    }
}
