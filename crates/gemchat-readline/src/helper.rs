use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hint, Hinter};
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::{SLASH_COMMANDS, describe};

/// Rustyline helper: slash-command completion, inline hints with the
/// command description, and highlighting of known/unknown commands.
#[derive(Clone, Default)]
pub struct CliHelper;

impl CliHelper {
    pub fn new() -> Self {
        Self
    }
}

/// Slash commands starting with `prefix`.
fn matching_commands(prefix: &str) -> impl Iterator<Item = &'static (&'static str, &'static str)> + '_ {
    SLASH_COMMANDS
        .iter()
        .filter(move |(name, _)| prefix.starts_with('/') && name.starts_with(prefix))
}

/// Hint shown after a partially typed command.
///
/// Accepting the hint inserts only the rest of the command name.
pub struct CommandHint {
    rest: String,
    display: String,
}

impl Hint for CommandHint {
    fn display(&self) -> &str {
        &self.display
    }

    fn completion(&self) -> Option<&str> {
        (!self.rest.is_empty()).then_some(self.rest.as_str())
    }
}

fn hint_for(line: &str) -> Option<CommandHint> {
    if line.contains(' ') {
        return None;
    }
    let mut matches = matching_commands(line);
    let (name, description) = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    let rest = name[line.len()..].to_string();
    Some(CommandHint {
        display: format!("{rest}  {description}"),
        rest,
    })
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = matching_commands(&line[..pos])
            .map(|(name, description)| Pair {
                display: format!("{name:<10}{description}"),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        if describe(line.trim_end()).is_some() {
            Owned(line.bright_cyan().to_string())
        } else {
            Owned(line.yellow().to_string())
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = CommandHint;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<CommandHint> {
        if pos < line.len() {
            return None;
        }
        hint_for(line)
    }
}

impl Validator for CliHelper {}
