//! Category command implementation.

use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

const ACTIONS: [&str; 3] = ["add", "list", "remove"];

/// Command to list, add and remove categories.
pub struct CategoryCommand;

impl CategoryCommand {
    fn list(ctx: &ShellContext) -> CommandResult {
        let categories = ctx.manager.categories();
        if categories.is_empty() {
            return CommandResult::success("No categories.");
        }

        let lines: Vec<String> = categories.iter().map(|c| format!("- {}", c)).collect();
        CommandResult::success(format!("Available categories:\n{}", lines.join("\n")))
    }
}

impl Command for CategoryCommand {
    fn name(&self) -> &str {
        "category"
    }

    fn aliases(&self) -> &[&str] {
        &["cat", "categories"]
    }

    fn description(&self) -> &str {
        "List, add or remove categories"
    }

    fn usage(&self) -> &str {
        "category [list | add <name> | remove <name>]"
    }

    fn help(&self) -> &str {
        "Manage categories.\n\n\
         list           - Show all categories (the default)\n\
         add <name>     - Create an empty category. It is kept only until\n                 \
                          the program exits unless an entry uses it.\n\
         remove <name>  - Delete the category AND every entry in it.\n\n\
         Examples:\n  \
           category\n  \
           category add Banking\n  \
           cat remove Old Stuff"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let (action, rest) = match args.split_first() {
            Some((action, rest)) => (*action, rest),
            None => ("list", &[][..]),
        };
        let name = rest.join(" ");

        match action {
            "list" | "ls" => Self::list(ctx),
            "add" => {
                if name.is_empty() {
                    return CommandResult::usage(self, "Missing category name");
                }
                if ctx.manager.categories().contains(&name) {
                    return CommandResult::error(format!("Category '{}' already exists", name));
                }
                ctx.manager.add_category(&name);
                ctx.mark_modified();
                log::info!("Added category: {}", name);
                CommandResult::success(format!("Added category '{}'", name))
            }
            "remove" | "rm" => {
                if name.is_empty() {
                    return CommandResult::usage(self, "Missing category name");
                }
                match ctx.manager.remove_category(&name) {
                    Ok(removed) => {
                        ctx.mark_modified();
                        log::info!("Removed category '{}' with {} entries", name, removed);
                        CommandResult::success(format!(
                            "Removed category '{}' and {} entries",
                            name, removed
                        ))
                    }
                    Err(e) => {
                        ctx.mark_modified();
                        CommandResult::error(format!("Failed to save: {:#}", e))
                    }
                }
            }
            other => CommandResult::usage(self, &format!("Unknown action '{}'", other)),
        }
    }

    fn completions(&self, args: &[&str], partial: &str, ctx: &CompletionContext) -> Vec<String> {
        match args {
            [] => ACTIONS
                .iter()
                .filter(|a| a.starts_with(partial))
                .map(|a| a.to_string())
                .collect(),
            ["remove" | "rm"] => ctx.index.categories.completions(partial),
            _ => vec![],
        }
    }
}
