//! Generate command implementation.

use crate::generator::{self, CharClasses};
use crate::shell::command::{Command, CommandResult, ShellContext};

const DEFAULT_LENGTH: usize = 16;

/// Command to print a random password.
pub struct GenerateCommand;

impl Command for GenerateCommand {
    fn name(&self) -> &str {
        "generate"
    }

    fn aliases(&self) -> &[&str] {
        &["gen", "pwgen"]
    }

    fn description(&self) -> &str {
        "Generate a random password"
    }

    fn usage(&self) -> &str {
        "generate [length] [classes]"
    }

    fn help(&self) -> &str {
        "Print a random password without storing it.\n\n\
         Arguments:\n  \
           [length]  - Number of characters (default 16)\n  \
           [classes] - Any of u (uppercase), l (lowercase) and\n              \
                       s (special characters); default uls\n\n\
         Characters are drawn independently, so a short password may not\n\
         contain every selected class.\n\n\
         Examples:\n  \
           generate\n  \
           generate 24\n  \
           gen 12 ul"
    }

    fn execute(&self, args: &[&str], _ctx: &mut ShellContext) -> CommandResult {
        let length = match args.first() {
            Some(arg) => match arg.parse::<usize>() {
                Ok(length) if length <= generator::MAX_LENGTH => length,
                Ok(_) => {
                    return CommandResult::usage(
                        self,
                        &format!("Length must be at most {}", generator::MAX_LENGTH),
                    );
                }
                Err(_) => return CommandResult::usage(self, &format!("Invalid length '{}'", arg)),
            },
            None => DEFAULT_LENGTH,
        };

        let classes = match args.get(1) {
            Some(arg) => match CharClasses::parse(arg) {
                Ok(classes) => classes,
                Err(e) => return CommandResult::usage(self, &e.to_string()),
            },
            None => CharClasses::all(),
        };

        let password = generator::generate(length, classes);
        if password.is_empty() {
            return CommandResult::error(
                "Nothing to generate: length is zero or no character class selected",
            );
        }

        CommandResult::success(password)
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}
