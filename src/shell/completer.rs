//! Tab completion for rustyline.
//!
//! Command names come from the registry; argument completion is delegated to
//! the command itself, which looks names up in the [`CompletionIndex`].

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::{Arc, RwLock};

use crate::manager::Manager;
use crate::shell::command::{CommandRegistry, CompletionContext};
use crate::trie::Trie;

/// Entry names and categories known to the shell.
///
/// Rebuilt from the manager whenever a command changes the store.
#[derive(Debug, Default)]
pub struct CompletionIndex {
    pub names: Trie,
    pub categories: Trie,
}

impl CompletionIndex {
    pub fn from_manager(manager: &Manager) -> Self {
        Self {
            names: Trie::from_words(manager.entries().iter().map(|e| e.name.as_str())),
            categories: Trie::from_words(manager.categories().iter().map(String::as_str)),
        }
    }
}

pub struct PassvaultCompleter {
    registry: Arc<CommandRegistry>,
    index: Arc<RwLock<CompletionIndex>>,
}

/// Where the cursor is: still on the command, or on one of its arguments.
#[derive(Debug, PartialEq, Eq)]
enum Position<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        args: Vec<&'a str>,
        partial: &'a str,
    },
}

impl PassvaultCompleter {
    pub fn new(registry: Arc<CommandRegistry>, index: Arc<RwLock<CompletionIndex>>) -> Self {
        Self { registry, index }
    }

    fn locate<'a>(&self, line: &'a str, pos: usize) -> Position<'a> {
        let line_to_pos = &line[..pos];
        let mut parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let at_new_word = line_to_pos.is_empty() || line_to_pos.ends_with(char::is_whitespace);

        let partial = if at_new_word { "" } else { parts.pop().unwrap_or("") };

        if parts.is_empty() {
            return Position::Command { partial };
        }

        let command = parts.remove(0);
        Position::Argument {
            command,
            args: parts,
            partial,
        }
    }

    fn candidates(&self, position: &Position) -> Vec<String> {
        match position {
            Position::Command { partial } => self.registry.completions(partial),
            Position::Argument {
                command,
                args,
                partial,
            } => {
                let Some(cmd) = self.registry.get(command) else {
                    return vec![];
                };
                let Ok(index) = self.index.read() else {
                    return vec![];
                };
                let ctx = CompletionContext {
                    index: &index,
                    registry: &self.registry,
                };
                cmd.completions(args, partial, &ctx)
            }
        }
    }
}

/// Text inserted for a candidate. Names with whitespace are quoted so the
/// line splits back into the same arguments.
fn replacement(candidate: &str) -> String {
    if candidate.chars().any(char::is_whitespace) {
        shell_words::quote(candidate).into_owned()
    } else {
        candidate.to_string()
    }
}

impl Completer for PassvaultCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let position = self.locate(line, pos);
        let partial_len = match &position {
            Position::Command { partial } | Position::Argument { partial, .. } => partial.len(),
        };

        let pairs = self
            .candidates(&position)
            .into_iter()
            .map(|s| Pair {
                replacement: replacement(&s),
                display: s,
            })
            .collect();

        Ok((pos - partial_len, pairs))
    }
}
