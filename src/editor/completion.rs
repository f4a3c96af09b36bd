// Command-name completion
//
// Prefix matching over the command names in registration order. Repeated
// Tab presses walk the matches; the cycling state lives in the edit session.

#[derive(Debug, Clone, Default)]
pub struct CompletionEngine {
    names: Vec<String>,
}

impl CompletionEngine {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Completion only starts from text beginning with a letter.
    pub fn is_completable(typed: &[u8]) -> bool {
        typed.first().is_some_and(u8::is_ascii_alphabetic)
    }

    /// First name at or after `from` that starts with `typed`.
    pub fn find_from(&self, typed: &[u8], from: usize) -> Option<(usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, name)| name.as_bytes().starts_with(typed))
            .map(|(index, name)| (index, name.as_str()))
    }
}
