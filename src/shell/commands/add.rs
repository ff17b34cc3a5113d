//! Add command implementation.

use anyhow::{Result, anyhow};

use crate::entry::Entry;
use crate::generator::{self, CharClasses};
use crate::shell::command::{Command, CommandResult, CompletionContext, ShellContext};

const DEFAULT_GENERATED_LENGTH: usize = 16;

/// Command to add a new entry.
pub struct AddCommand;

/// Where the password of a new entry comes from.
#[derive(Debug, PartialEq, Eq)]
enum PasswordInput {
    Literal(String),
    Prompt,
    Generate(usize),
}

impl PasswordInput {
    fn parse(arg: Option<&str>) -> Result<Self> {
        match arg {
            None | Some("-") => Ok(PasswordInput::Prompt),
            Some("-g") => Ok(PasswordInput::Generate(DEFAULT_GENERATED_LENGTH)),
            Some(arg) => match arg.strip_prefix("-g") {
                Some(len) => match len.parse::<usize>() {
                    Ok(length) if length <= generator::MAX_LENGTH => {
                        Ok(PasswordInput::Generate(length))
                    }
                    Ok(_) => Err(anyhow!(
                        "Password length must be at most {}",
                        generator::MAX_LENGTH
                    )),
                    Err(_) => Err(anyhow!("Invalid password length '{}'", len)),
                },
                None => Ok(PasswordInput::Literal(arg.to_string())),
            },
        }
    }
}

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn aliases(&self) -> &[&str] {
        &["a", "new"]
    }

    fn description(&self) -> &str {
        "Add a new entry"
    }

    fn usage(&self) -> &str {
        "add <name> [password] [category] [website] [login]"
    }

    fn help(&self) -> &str {
        "Add a new entry to the store.\n\n\
         Arguments:\n  \
           <name>     - Name of the entry (need not be unique)\n  \
           [password] - The password; '-' or nothing prompts for it,\n               \
                        '-g' generates 16 characters, '-g24' generates 24\n  \
           [category] - Category label (optional)\n  \
           [website]  - Website (optional)\n  \
           [login]    - Login (optional)\n\n\
         A warning is shown when another entry already uses the password.\n\n\
         Examples:\n  \
           add github -g Work github.com octocat\n  \
           add email\n  \
           add bank s3cret Finance"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::usage(self, "Missing entry name");
        }

        let input = match PasswordInput::parse(args.get(1).copied()) {
            Ok(input) => input,
            Err(e) => return CommandResult::usage(self, &e.to_string()),
        };

        let mut notes = Vec::new();
        let password = match input {
            PasswordInput::Literal(password) => password,
            PasswordInput::Prompt => match rpassword::prompt_password("Password: ") {
                Ok(password) => password,
                Err(e) => return CommandResult::error(format!("Failed to read password: {}", e)),
            },
            PasswordInput::Generate(length) => {
                let password = generator::generate(length, CharClasses::all());
                notes.push(format!("Generated password: {}", password));
                password
            }
        };

        if password.is_empty() {
            return CommandResult::error("Password cannot be empty");
        }

        if ctx.manager.is_password_used(&password) {
            notes.push(
                "Warning: this password is already used by another entry. \
                 Consider using a different password."
                    .to_string(),
            );
        }

        let entry = Entry::new(args[0], password)
            .with_category(args.get(2).copied().unwrap_or_default())
            .with_website(args.get(3).copied().unwrap_or_default())
            .with_login(args.get(4).copied().unwrap_or_default());

        log::debug!("Adding entry: {}", entry.name);

        match ctx.manager.add(entry) {
            Ok(()) => {
                ctx.mark_modified();
                log::info!("Added entry: {}", args[0]);
                notes.push(format!("Added '{}'", args[0]));
                CommandResult::success(notes.join("\n"))
            }
            Err(e) => {
                // The entry is in memory even though the write failed.
                ctx.mark_modified();
                CommandResult::error(format!("Failed to save: {:#}", e))
            }
        }
    }

    fn completions(&self, args: &[&str], partial: &str, ctx: &CompletionContext) -> Vec<String> {
        if args.len() == 2 {
            ctx.index.categories.completions(partial)
        } else {
            vec![]
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(5)
    }

    fn sensitive(&self) -> bool {
        true
    }
}
