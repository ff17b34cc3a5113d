//! Search command implementation.

use super::format_entries;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to find entries containing a piece of text.
pub struct SearchCommand;

impl Command for SearchCommand {
    fn name(&self) -> &str {
        "search"
    }

    fn aliases(&self) -> &[&str] {
        &["find", "s"]
    }

    fn description(&self) -> &str {
        "Search all fields for text"
    }

    fn usage(&self) -> &str {
        "search <query>"
    }

    fn help(&self) -> &str {
        "Show every entry where the query appears in the name, password,\n\
         category, website or login. Matching is case-sensitive.\n\n\
         Examples:\n  \
           search github\n  \
           find example.com"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::usage(self, "Missing search query");
        }

        let query = args.join(" ");
        let matches = ctx.manager.search(&query);
        log::debug!("Search matched {} entries", matches.len());

        if matches.is_empty() {
            return CommandResult::success("No matching entries found.");
        }

        CommandResult::success(format!("Search results:\n\n{}", format_entries(matches)))
    }

    fn min_args(&self) -> usize {
        1
    }
}
