//! Show command implementation.

use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

/// Command to display a single entry.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["get", "g"]
    }

    fn description(&self) -> &str {
        "Show an entry by name"
    }

    fn usage(&self) -> &str {
        "show <name>"
    }

    fn help(&self) -> &str {
        "Display every field of an entry, password included.\n\n\
         If several entries share the name, the first one is shown.\n\n\
         Examples:\n  \
           show github\n  \
           get email"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(&name) = args.first() else {
            return CommandResult::usage(self, "Missing entry name");
        };

        match ctx.manager.find(name) {
            Some(entry) => {
                log::info!("Displayed entry: {}", name);
                CommandResult::success(entry.to_string())
            }
            None => CommandResult::error(format!("'{}' not found", name)),
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
