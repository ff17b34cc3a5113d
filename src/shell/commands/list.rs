//! List command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to list all entries.
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls", "l"]
    }

    fn description(&self) -> &str {
        "List all entries"
    }

    fn usage(&self) -> &str {
        "list"
    }

    fn help(&self) -> &str {
        "List the name and category of every entry, in the order they were\n\
         added. Passwords are not shown; use 'show' or 'sort' for that.\n\n\
         Examples:\n  \
           list\n  \
           ls"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if ctx.manager.is_empty() {
            return CommandResult::success("No entries stored.");
        }

        let output = ctx
            .manager
            .entries()
            .iter()
            .map(|e| {
                if e.category.is_empty() {
                    e.name.clone()
                } else {
                    format!("{:<24} [{}]", e.name, e.category)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        log::info!("Listed {} entries", ctx.manager.len());
        CommandResult::success(output)
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::shell::commands::test_support::temp_manager;

    #[test]
    fn test_list_command_empty() {
        let (mut manager, _dir) = temp_manager();
        let mut ctx = ShellContext::new(&mut manager);

        match ListCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("No entries")),
            other => panic!("Expected success message, got {:?}", other),
        }
    }

    #[test]
    fn test_list_command_keeps_insertion_order() {
        let (mut manager, _dir) = temp_manager();
        manager.add(Entry::new("github", "1").with_category("Work")).unwrap();
        manager.add(Entry::new("email", "2")).unwrap();
        manager.add(Entry::new("aws", "3")).unwrap();
        let mut ctx = ShellContext::new(&mut manager);

        match ListCommand.execute(&[], &mut ctx) {
            CommandResult::Success(Some(msg)) => {
                let lines: Vec<&str> = msg.lines().collect();
                assert_eq!(lines.len(), 3);
                assert!(lines[0].starts_with("github"));
                assert!(lines[0].ends_with("[Work]"));
                assert_eq!(lines[1], "email");
                assert_eq!(lines[2], "aws");
                assert!(!msg.contains('1'));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }
}
