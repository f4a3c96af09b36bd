// String queue
//
// Ordered sequence of owned strings manipulated by the console commands.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringQueue {
    items: VecDeque<String>,
}

impl StringQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_head(&mut self, value: impl Into<String>) {
        self.items.push_front(value.into());
    }

    pub fn insert_tail(&mut self, value: impl Into<String>) {
        self.items.push_back(value.into());
    }

    pub fn remove_head(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn reverse(&mut self) {
        self.items.make_contiguous().reverse();
    }

    /// Stable ascending sort by byte order.
    pub fn sort(&mut self) {
        self.items.make_contiguous().sort();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}

/// `[a, b, c]`
impl fmt::Display for StringQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}
