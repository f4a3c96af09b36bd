// Command dispatch
//
// Splits a trimmed line into arguments, resolves the command and calls its
// handler.

use tracing::debug;

use super::commands::Resolution;
use super::console::ConsoleContext;
use crate::errors::ConsoleError;

/// Split on single spaces, skipping empty tokens, keeping at most
/// `max_args` tokens.
pub fn tokenize(line: &str, max_args: usize) -> Vec<String> {
    line.split(' ')
        .filter(|token| !token.is_empty())
        .take(max_args)
        .map(str::to_string)
        .collect()
}

/// Run `line` against the command table.
///
/// An empty line does nothing. An unknown or ambiguous command name and a
/// failing handler are returned as errors; the caller decides whether they
/// end the session.
pub fn dispatch(ctx: &mut ConsoleContext, line: &str) -> Result<(), ConsoleError> {
    let mut argv = tokenize(line, ctx.config.max_args);
    let Some(token) = argv.first() else {
        return Ok(());
    };

    let (name, handler) = match ctx.commands.resolve(token) {
        Resolution::Exact(entry) | Resolution::Abbreviation(entry) => {
            (entry.name().to_string(), entry.handler())
        }
        Resolution::Ambiguous(candidates) => {
            debug!("'{}' matches {:?}", token, candidates);
            return Err(ConsoleError::UnknownCommand(token.clone()));
        }
        Resolution::Unknown => return Err(ConsoleError::UnknownCommand(token.clone())),
    };

    argv[0] = name.clone();
    handler(ctx, &argv).map_err(|source| ConsoleError::CommandFailed { name, source })
}
