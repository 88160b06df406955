use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub const RETRY_COMMAND: &str = "/retry";
pub const NEW_COMMAND: &str = "/new";
pub const HELP_COMMAND: &str = "/help";

/// Rustyline helper that completes REPL commands and the choice tokens of the
/// step currently being asked.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    choices: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: vec![
                RETRY_COMMAND.to_string(),
                NEW_COMMAND.to_string(),
                HELP_COMMAND.to_string(),
            ],
            choices: Vec::new(),
        }
    }

    /// Replaces the tokens offered for the current step.
    pub fn set_choices<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = tokens.into_iter().map(Into::into).collect();
    }

    fn candidates<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        let pool = if line.starts_with('/') {
            &self.commands
        } else {
            &self.choices
        };
        pool.iter().filter(move |candidate| candidate.starts_with(line))
    }

    fn is_known(&self, line: &str) -> bool {
        self.commands.iter().chain(&self.choices).any(|c| c == line)
    }
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
        let line = &line[..pos];
        let candidates = self
            .candidates(line)
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else if self.is_known(line) {
            Owned(line.bright_green().to_string())
        } else {
            Borrowed(line)
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
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        self.candidates(line)
            .find(|candidate| candidate.len() > line.len())
            .map(|candidate| candidate[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}
