//! Command trait and registry for the shell.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::manager::Manager;
use crate::shell::completer::CompletionIndex;
use crate::trie::Trie;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }

    /// Error for a command invoked with the wrong arguments.
    pub fn usage(command: &dyn Command, problem: &str) -> Self {
        CommandResult::Error(format!("Usage: {}\n{}", command.usage(), problem))
    }
}

/// What a command can touch while it runs.
pub struct ShellContext<'a> {
    pub manager: &'a mut Manager,
    /// Set when the entry list or categories changed, so completions can be
    /// rebuilt.
    pub modified: bool,
    /// Reference to the command registry for the help command.
    pub registry: Option<&'a CommandRegistry>,
}

impl<'a> ShellContext<'a> {
    pub fn new(manager: &'a mut Manager) -> Self {
        Self {
            manager,
            modified: false,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }
}

/// What a command can look at while completing an argument.
pub struct CompletionContext<'a> {
    pub index: &'a CompletionIndex,
    pub registry: &'a CommandRegistry,
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Returns the primary name of the command.
    fn name(&self) -> &str;

    /// Returns command aliases (alternative names).
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Returns usage information (e.g., "remove <name>").
    fn usage(&self) -> &str;

    /// Returns detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    /// Executes the command with the given arguments.
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// Returns completions for the next argument.
    ///
    /// `args` holds the arguments already typed before the one being
    /// completed and `partial` the text of that argument so far.
    fn completions(&self, _args: &[&str], _partial: &str, _ctx: &CompletionContext) -> Vec<String> {
        vec![]
    }

    /// Returns the minimum number of required arguments.
    fn min_args(&self) -> usize {
        0
    }

    /// Returns the maximum number of arguments (None = unlimited).
    fn max_args(&self) -> Option<usize> {
        None
    }

    /// Lines invoking this command may contain a password and are kept out
    /// of the history file.
    fn sensitive(&self) -> bool {
        false
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    /// Commands indexed by their primary name.
    commands: HashMap<String, Arc<dyn Command>>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Names and aliases, for completion.
    command_trie: Trie,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            command_trie: Trie::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.command_trie.insert(&name);

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.command_trie.insert(alias);
        }

        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(Arc::clone(cmd));
        }

        self.aliases
            .get(name)
            .and_then(|primary| self.commands.get(primary))
            .map(Arc::clone)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Returns command name completions for the given prefix.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.command_trie.completions(prefix)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
