// Interpreter - queue console with a raw-terminal line editor
// Library exports

pub mod cli;
pub mod config;
pub mod editor;
pub mod errors;
pub mod logging;
pub mod queue;
pub mod terminal;
