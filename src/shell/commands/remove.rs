//! Remove command implementation.

use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

/// Command to remove entries by name.
pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "delete", "del"]
    }

    fn description(&self) -> &str {
        "Remove entries by name"
    }

    fn usage(&self) -> &str {
        "remove <name>"
    }

    fn help(&self) -> &str {
        "Remove an entry from the store.\n\n\
         Every entry with the given name is removed.\n\n\
         Arguments:\n  \
           <name> - The name of the entry to remove\n\n\
         Examples:\n  \
           remove github\n  \
           rm old-email"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(&name) = args.first() else {
            return CommandResult::usage(self, "Missing entry name");
        };

        log::debug!("Removing entry: {}", name);

        match ctx.manager.remove(name) {
            Ok(true) => {
                ctx.mark_modified();
                log::info!("Removed entry: {}", name);
                CommandResult::success(format!("Removed '{}'", name))
            }
            Ok(false) => CommandResult::error(format!("'{}' not found", name)),
            Err(e) => {
                ctx.mark_modified();
                CommandResult::error(format!("Failed to save: {:#}", e))
            }
        }
    }

    fn completions(&self, args: &[&str], partial: &str, ctx: &CompletionContext) -> Vec<String> {
        if args.is_empty() {
            ctx.index.names.completions(partial)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
