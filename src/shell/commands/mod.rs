//! Individual command implementations.

mod add;
mod category;
mod edit;
mod generate;
mod help;
mod list;
mod quit;
mod remove;
mod search;
mod show;
mod sort;

pub use add::AddCommand;
pub use category::CategoryCommand;
pub use edit::EditCommand;
pub use generate::GenerateCommand;
pub use help::HelpCommand;
pub use list::ListCommand;
pub use quit::QuitCommand;
pub use remove::RemoveCommand;
pub use search::SearchCommand;
pub use show::ShowCommand;
pub use sort::SortCommand;

use std::sync::Arc;

use super::command::CommandRegistry;
use crate::entry::Entry;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(EditCommand));
    registry.register(Arc::new(RemoveCommand));
    registry.register(Arc::new(ShowCommand));
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(SearchCommand));
    registry.register(Arc::new(SortCommand));
    registry.register(Arc::new(CategoryCommand));
    registry.register(Arc::new(GenerateCommand));
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(QuitCommand));
}

/// Formats entries one block per entry, separated by blank lines.
fn format_entries<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    entries
        .into_iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}
