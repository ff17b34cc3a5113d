//! Sort command implementation.

use super::format_entries;
use crate::entry::SortField;
use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

/// Command to display entries ordered by one or more fields.
pub struct SortCommand;

impl Command for SortCommand {
    fn name(&self) -> &str {
        "sort"
    }

    fn aliases(&self) -> &[&str] {
        &["sorted"]
    }

    fn description(&self) -> &str {
        "Show entries sorted by fields"
    }

    fn usage(&self) -> &str {
        "sort <field>..."
    }

    fn help(&self) -> &str {
        "Show all entries sorted by the given fields. The first field is the\n\
         primary key; later fields break ties. The stored order is not\n\
         changed.\n\n\
         Fields: name, password, category, website, login\n\n\
         Examples:\n  \
           sort name\n  \
           sort category name"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::usage(self, "Missing sort field");
        }

        let unknown: Vec<&str> = args
            .iter()
            .copied()
            .filter(|f| f.parse::<SortField>().is_err())
            .collect();

        if ctx.manager.is_empty() {
            return CommandResult::success("No entries stored.");
        }

        let mut output = String::new();
        if !unknown.is_empty() {
            output.push_str(&format!("Ignoring unknown fields: {}\n\n", unknown.join(", ")));
        }
        output.push_str(&format_entries(ctx.manager.sorted_view(args)));

        CommandResult::success(output)
    }

    fn completions(&self, _args: &[&str], partial: &str, _ctx: &CompletionContext) -> Vec<String> {
        SortField::ALL
            .iter()
            .map(|f| f.as_str())
            .filter(|f| f.starts_with(partial))
            .map(String::from)
            .collect()
    }

    fn min_args(&self) -> usize {
        1
    }
}
