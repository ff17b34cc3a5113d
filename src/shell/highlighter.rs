//! Syntax highlighting for shell input and colours for shell output.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// ANSI color codes for highlighting.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Highlighter for shell input.
pub struct PassvaultHighlighter {
    registry: Arc<CommandRegistry>,
}

impl PassvaultHighlighter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn highlight_line(&self, line: &str) -> String {
        let trimmed = line.trim_start();
        let Some(command) = trimmed.split_whitespace().next() else {
            return line.to_string();
        };

        let mut result = String::from(&line[..line.len() - trimmed.len()]);

        let canonical = self.registry.get(command).map(|c| c.name().to_string());
        match canonical {
            Some(_) => {
                result.push_str(colors::BOLD);
                result.push_str(colors::CYAN);
            }
            None => result.push_str(colors::RED),
        }
        result.push_str(command);
        result.push_str(colors::RESET);

        let rest = &trimmed[command.len()..];
        result.push_str(&Self::highlight_arguments(canonical.as_deref(), rest));
        result
    }

    /// Colour for the argument at `index`, given the resolved command name.
    fn argument_color(command: Option<&str>, index: usize, arg: &str) -> &'static str {
        match (command, index) {
            (Some("add"), 0) => colors::MAGENTA,
            (Some("add"), 1) => colors::DIM,
            (Some("edit"), 0) => colors::MAGENTA,
            (Some("edit"), _) if arg.starts_with("password=") => colors::DIM,
            (Some("show" | "remove"), _) => colors::MAGENTA,
            (Some("category"), 0) | (Some("help"), _) | (Some("sort"), _) => colors::YELLOW,
            _ => colors::WHITE,
        }
    }

    fn highlight_arguments(command: Option<&str>, args_str: &str) -> String {
        let mut result = String::new();
        let mut pos = 0;

        for (i, part) in args_str.split_whitespace().enumerate() {
            let part_start = args_str[pos..].find(part).unwrap_or(0) + pos;
            result.push_str(&args_str[pos..part_start]);

            result.push_str(Self::argument_color(command, i, part));
            result.push_str(part);
            result.push_str(colors::RESET);

            pos = part_start + part.len();
        }

        result.push_str(&args_str[pos..]);
        result
    }
}

impl Highlighter for PassvaultHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Colours for messages printed by the shell.
pub struct OutputHighlighter;

impl OutputHighlighter {
    pub fn error(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_RED, msg, colors::RESET)
    }

    pub fn warning(msg: &str) -> String {
        format!("{}{}{}", colors::YELLOW, msg, colors::RESET)
    }

    pub fn info(msg: &str) -> String {
        format!("{}{}{}", colors::GREEN, msg, colors::RESET)
    }
}
