//! Edit command implementation.

use anyhow::{Result, anyhow};

use crate::entry::{Entry, SortField};
use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

/// Command to change fields of an existing entry.
pub struct EditCommand;

/// Applies `field=value` assignments to a copy of `entry`.
fn apply_assignments(entry: &Entry, assignments: &[&str]) -> Result<Entry> {
    let mut edited = entry.clone();
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected <field>=<value>, got '{}'", assignment))?;
        let field: SortField = field.parse()?;
        edited.set_field(field, value);
    }

    if edited.name.is_empty() {
        return Err(anyhow!("Name cannot be empty"));
    }
    if edited.password.is_empty() {
        return Err(anyhow!("Password cannot be empty"));
    }
    Ok(edited)
}

impl Command for EditCommand {
    fn name(&self) -> &str {
        "edit"
    }

    fn aliases(&self) -> &[&str] {
        &["e", "modify"]
    }

    fn description(&self) -> &str {
        "Change fields of an entry"
    }

    fn usage(&self) -> &str {
        "edit <name> <field>=<value>..."
    }

    fn help(&self) -> &str {
        "Change one or more fields of an entry.\n\n\
         Fields not mentioned keep their current value. If several entries\n\
         share the name, only the first one is changed.\n\n\
         Fields: name, password, category, website, login\n\n\
         Examples:\n  \
           edit github password=n3w category=Work\n  \
           edit github name=github-work\n  \
           edit email website="
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.len() < 2 {
            return CommandResult::usage(self, "Missing entry name or fields to change");
        }

        let name = args[0];
        let Some(current) = ctx.manager.find(name) else {
            return CommandResult::error(format!("'{}' not found", name));
        };

        let edited = match apply_assignments(current, &args[1..]) {
            Ok(edited) => edited,
            Err(e) => return CommandResult::error(e.to_string()),
        };

        log::debug!("Editing entry: {}", name);

        match ctx.manager.edit(name, edited) {
            Ok(true) => {
                ctx.mark_modified();
                log::info!("Edited entry: {}", name);
                CommandResult::success(format!("Updated '{}'", name))
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
            return ctx.index.names.completions(partial);
        }

        match partial.split_once('=') {
            Some(("category", value)) => ctx
                .index
                .categories
                .completions(value)
                .into_iter()
                .map(|c| format!("category={}", c))
                .collect(),
            Some(_) => vec![],
            None => SortField::ALL
                .iter()
                .map(|f| format!("{}=", f))
                .filter(|f| f.starts_with(partial))
                .collect(),
        }
    }

    fn min_args(&self) -> usize {
        2
    }

    fn sensitive(&self) -> bool {
        true
    }
}
