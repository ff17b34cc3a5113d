//! Inline hints: the rest of a command name, or its missing arguments.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

pub struct PassvaultHinter {
    registry: Arc<CommandRegistry>,
}

impl PassvaultHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        let has_trailing_space = line.ends_with(' ');
        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = *parts.first()?;

        if parts.len() == 1 && !has_trailing_space {
            let completions = self.registry.completions(command);
            return match completions.as_slice() {
                [only] if only.len() > command.len() => Some(only[command.len()..].to_string()),
                _ => None,
            };
        }

        // Only required arguments get a hint.
        let cmd = self.registry.get(command)?;
        let arg_count = parts.len() - 1;
        if arg_count >= cmd.min_args() {
            return None;
        }

        let usage_args: Vec<&str> = cmd
            .usage()
            .strip_prefix(cmd.name())?
            .split_whitespace()
            .take(cmd.min_args())
            .collect();
        let remaining = usage_args.get(arg_count..)?;

        let prefix = if has_trailing_space { "" } else { " " };
        Some(format!("{}{}", prefix, remaining.join(" ")))
    }
}

impl Hinter for PassvaultHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }
        self.get_hint(line)
    }
}
