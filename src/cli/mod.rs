// CLI module
// Command table, dispatcher and the console run loop

mod builtins;
mod commands;
mod console;
mod dispatcher;

pub use builtins::{random_string, register_builtins, show_queue};
pub use commands::{CommandEntry, CommandResult, CommandTable, Handler, Resolution};
pub use console::{Console, ConsoleContext, InputSource, RunOutcome};
pub use dispatcher::{dispatch, tokenize};
