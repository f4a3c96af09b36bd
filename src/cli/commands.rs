// Command table
//
// Named handlers in registration order. The order drives both the help
// listing and the completion scan.

use std::fmt;
use std::rc::Rc;

use super::console::ConsoleContext;
use crate::errors::{CommandError, ConsoleError};

pub type CommandResult = Result<(), CommandError>;

/// Handler called with the context and the argument vector (`argv[0]` is
/// the canonical command name).
pub type Handler = Rc<dyn Fn(&mut ConsoleContext, &[String]) -> CommandResult>;

#[derive(Clone)]
pub struct CommandEntry {
    name: String,
    doc: String,
    handler: Handler,
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage and description, printed right after the name by `help`.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn handler(&self) -> Handler {
        Rc::clone(&self.handler)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// How a typed command token maps onto the table.
#[derive(Debug)]
pub enum Resolution<'t> {
    Exact(&'t CommandEntry),
    /// The token is a prefix of exactly one name.
    Abbreviation(&'t CommandEntry),
    /// The token is a prefix of several names.
    Ambiguous(Vec<&'t str>),
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, doc: &str, handler: F) -> Result<(), ConsoleError>
    where
        F: Fn(&mut ConsoleContext, &[String]) -> CommandResult + 'static,
    {
        if self.get(name).is_some() {
            return Err(ConsoleError::DuplicateCommand(name.to_string()));
        }
        self.entries.push(CommandEntry {
            name: name.to_string(),
            doc: doc.to_string(),
            handler: Rc::new(handler),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(CommandEntry::name)
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Exact name first, then a unique prefix abbreviation.
    pub fn resolve(&self, token: &str) -> Resolution<'_> {
        if let Some(entry) = self.get(token) {
            return Resolution::Exact(entry);
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| entry.name.starts_with(token));
        match (matches.next(), matches.next()) {
            (None, _) => Resolution::Unknown,
            (Some(entry), None) => Resolution::Abbreviation(entry),
            (Some(first), Some(second)) => {
                let mut names = vec![first.name(), second.name()];
                names.extend(matches.map(CommandEntry::name));
                Resolution::Ambiguous(names)
            }
        }
    }
}
