// Built-in commands
//
// The queue exercise command set plus help and quit.

use rand::Rng;

use super::commands::{CommandResult, CommandTable};
use super::console::ConsoleContext;
use crate::config::constants::{RAND_MAX_LEN, RAND_MIN_LEN};
use crate::errors::{CommandError, ConsoleError};
use crate::queue::StringQueue;

/// Argument that makes `ih`/`it` insert generated strings.
const RANDOM_TOKEN: &str = "RAND";

/// Register the built-in commands in help and completion order.
pub fn register_builtins(table: &mut CommandTable) -> Result<(), ConsoleError> {
    table.register("help", "\t#Show documents", help)?;
    table.register("new", "\t#Create a queue", new_queue)?;
    table.register("free", "\t#Delete a queue", free_queue)?;
    table.register(
        "ih",
        " str [n]\t#Insert n times of str at head, n>=1. Generate a string if str is RAND",
        insert_head,
    )?;
    table.register(
        "it",
        " str [n]\t#Insert n times of str at tail, n>=1. Generate a string if str is RAND",
        insert_tail,
    )?;
    table.register("rh", "\t#Remove the first element", remove_head)?;
    table.register("size", "\t#Show the size of queue", size)?;
    table.register("reverse", "\t#Reverse the queue", reverse)?;
    table.register("sort", "\t#Sort the queue", sort)?;
    table.register("show", "\t#Show the queue", show)?;
    table.register("quit", "\t#Exit program", quit)?;
    Ok(())
}

/// Lowercase ASCII string of random length in `RAND_MIN_LEN..=RAND_MAX_LEN`.
pub fn random_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.gen_range(RAND_MIN_LEN..=RAND_MAX_LEN);
    (0..len).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
}

/// Print the queue as `queue = [a, b]`. `always` overrides the verbose flag.
pub fn show_queue(ctx: &mut ConsoleContext, always: bool) {
    let Some(queue) = &ctx.queue else {
        return;
    };
    let msg = format!("queue = {}", queue);
    if always {
        ctx.messages.show_always(&msg);
    } else {
        ctx.messages.show(&msg);
    }
}

fn queue_mut(ctx: &mut ConsoleContext) -> Result<&mut StringQueue, CommandError> {
    ctx.queue.as_mut().ok_or(CommandError::NoQueue)
}

fn parse_count(arg: &str) -> Result<usize, CommandError> {
    arg.parse::<usize>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or(CommandError::InvalidCount)
}

fn help(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    ctx.messages.print("\tCommand\tDescription");
    for entry in ctx.commands.iter() {
        ctx.messages.print(&format!("\t{}{}", entry.name(), entry.doc()));
    }
    Ok(())
}

fn new_queue(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    ctx.queue = Some(StringQueue::new());
    show_queue(ctx, false);
    Ok(())
}

fn free_queue(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    ctx.queue.take().ok_or(CommandError::NoQueue)?;
    ctx.messages.show("the queue is freed");
    Ok(())
}

#[derive(Clone, Copy)]
enum End {
    Head,
    Tail,
}

fn insert(ctx: &mut ConsoleContext, argv: &[String], end: End) -> CommandResult {
    if ctx.queue.is_none() {
        return Err(CommandError::NoQueue);
    }
    let value = argv.get(1).ok_or(CommandError::MissingArgument("str"))?;
    let count = match argv.get(2) {
        Some(n) => parse_count(n)?,
        None => 1,
    };
    let random = value == RANDOM_TOKEN;

    let queue = ctx.queue.as_mut().ok_or(CommandError::NoQueue)?;
    for _ in 0..count {
        let item = if random {
            random_string(&mut ctx.rng)
        } else {
            value.clone()
        };
        match end {
            End::Head => queue.insert_head(item),
            End::Tail => queue.insert_tail(item),
        }
    }
    show_queue(ctx, false);
    Ok(())
}

fn insert_head(ctx: &mut ConsoleContext, argv: &[String]) -> CommandResult {
    insert(ctx, argv, End::Head)
}

fn insert_tail(ctx: &mut ConsoleContext, argv: &[String]) -> CommandResult {
    insert(ctx, argv, End::Tail)
}

fn remove_head(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    queue_mut(ctx)?.remove_head();
    show_queue(ctx, false);
    Ok(())
}

fn size(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    let len = queue_mut(ctx)?.len();
    ctx.messages.show(&format!("the size of queue is {}", len));
    Ok(())
}

fn reverse(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    queue_mut(ctx)?.reverse();
    show_queue(ctx, false);
    Ok(())
}

fn sort(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    queue_mut(ctx)?.sort();
    show_queue(ctx, false);
    Ok(())
}

fn show(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    queue_mut(ctx)?;
    show_queue(ctx, true);
    Ok(())
}

fn quit(ctx: &mut ConsoleContext, _argv: &[String]) -> CommandResult {
    ctx.quit = true;
    if ctx.queue.take().is_some() {
        ctx.messages.show("the queue is freed");
    }
    Ok(())
}
