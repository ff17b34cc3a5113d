//! Shell module - rustyline-based interactive front end for the manager.
//!
//! This module provides a shell-like interface with:
//! - Command completion (commands, entry names, categories, fields)
//! - Syntax highlighting
//! - Command history (lines that may carry passwords are not recorded)
//! - Usage hints

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

use anyhow::{Result, anyhow};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::{
    MatchingBracketValidator, ValidationContext, ValidationResult, Validator,
};
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

use crate::logging::timed;
use crate::manager::Manager;

use command::{CommandRegistry, CommandResult, ShellContext};
use commands::register_all;
use completer::{CompletionIndex, PassvaultCompleter};
use highlighter::{OutputHighlighter, PassvaultHighlighter};
use hints::PassvaultHinter;
use history::{HistoryConfig, HistoryFilter};

/// The prompt displayed to the user.
const PROMPT: &str = "passvault> ";

/// Combined helper for rustyline that provides all shell features.
pub struct PassvaultHelper {
    completer: PassvaultCompleter,
    highlighter: PassvaultHighlighter,
    hinter: PassvaultHinter,
    validator: MatchingBracketValidator,
}

impl PassvaultHelper {
    pub fn new(registry: Arc<CommandRegistry>, index: Arc<RwLock<CompletionIndex>>) -> Self {
        Self {
            completer: PassvaultCompleter::new(Arc::clone(&registry), index),
            highlighter: PassvaultHighlighter::new(Arc::clone(&registry)),
            hinter: PassvaultHinter::new(registry),
            validator: MatchingBracketValidator::new(),
        }
    }
}

impl Completer for PassvaultHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for PassvaultHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for PassvaultHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Validator for PassvaultHelper {
    fn validate(&self, ctx: &mut ValidationContext<'_>) -> rustyline::Result<ValidationResult> {
        self.validator.validate(ctx)
    }
}

impl Helper for PassvaultHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    /// Whether to show the welcome message.
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    /// Completion data shared with the rustyline helper.
    index: Arc<RwLock<CompletionIndex>>,
    config: ShellConfig,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            index: Arc::new(RwLock::new(CompletionIndex::default())),
            config,
        }
    }

    /// Rebuilds the completion index from the manager's current state.
    fn refresh_index(&self, manager: &Manager) {
        match self.index.write() {
            Ok(mut index) => {
                *index = CompletionIndex::from_manager(manager);
                log::debug!(
                    "Completion index: {} names, {} categories",
                    index.names.len(),
                    index.categories.len()
                );
            }
            Err(e) => log::warn!("Completion index lock poisoned: {}", e),
        }
    }

    /// Runs the interactive loop until the user quits or input ends.
    pub fn run(&self, manager: &mut Manager) -> Result<()> {
        self.refresh_index(manager);

        let helper = PassvaultHelper::new(Arc::clone(&self.registry), Arc::clone(&self.index));
        let mut editor: Editor<PassvaultHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        editor.set_max_history_size(self.config.history.max_entries)?;

        let history_path = &self.config.history.path;
        if history_path.exists() {
            if let Err(e) = editor.load_history(history_path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", history_path.display());
            }
        }
        let mut filter = HistoryFilter::new(&self.config.history);

        if self.config.show_welcome {
            println!("Type 'help' for available commands.");
        }
        log::info!("Shell started");

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let sensitive = line
                        .split_whitespace()
                        .next()
                        .and_then(|name| self.registry.get(name))
                        .is_some_and(|cmd| cmd.sensitive());
                    if filter.should_add(line, sensitive) {
                        let _ = editor.add_history_entry(line);
                    }

                    match self.execute_line(line, manager) {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) | CommandResult::Continue => {}
                        CommandResult::Error(msg) => {
                            eprintln!("{}", OutputHighlighter::error(&msg));
                        }
                        CommandResult::Exit => {
                            println!("Exiting...");
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    log::error!("Readline error: {}", err);
                    return Err(anyhow!("Readline error: {}", err));
                }
            }
        }

        if let Some(parent) = history_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if let Err(e) = editor.save_history(history_path) {
            log::warn!("Failed to save history: {}", e);
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes one input line against the manager.
    ///
    /// Arguments are split like a POSIX shell, so quotes keep spaces inside
    /// one argument: `show "My Bank"`.
    pub fn execute_line(&self, line: &str, manager: &mut Manager) -> CommandResult {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => return CommandResult::error(format!("Could not parse input: {}", e)),
        };
        let parts: Vec<&str> = words.iter().map(String::as_str).collect();
        let Some((&cmd_name, args)) = parts.split_first() else {
            return CommandResult::Continue;
        };

        let Some(cmd) = self.registry.get(cmd_name) else {
            return CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                cmd_name
            ));
        };

        if let Some(max) = cmd.max_args() {
            if args.len() > max {
                return CommandResult::usage(cmd.as_ref(), "Too many arguments");
            }
        }

        // Arguments may contain passwords, so only the command is logged.
        log::debug!("Executing command: {} ({} args)", cmd.name(), args.len());

        let mut ctx = ShellContext::new(manager).with_registry(&self.registry);
        let result = timed(cmd.name(), || cmd.execute(args, &mut ctx));
        let modified = ctx.modified;

        if modified {
            self.refresh_index(manager);
        }
        result
    }

    #[cfg(test)]
    fn index_contains_name(&self, name: &str) -> bool {
        self.index
            .read()
            .map(|index| index.names.contains(name))
            .unwrap_or(false)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
