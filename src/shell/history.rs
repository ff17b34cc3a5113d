//! Command history settings and filtering.

use std::path::PathBuf;

/// Configuration for command history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Path to the history file.
    pub path: PathBuf,
    /// Maximum number of entries to keep.
    pub max_entries: usize,
    /// Whether to skip a line identical to the previous one.
    pub ignore_dups: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("history"),
            max_entries: 1000,
            ignore_dups: true,
        }
    }
}

impl HistoryConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn with_ignore_dups(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }
}

/// Decides which input lines are recorded in history.
pub struct HistoryFilter {
    ignore_dups: bool,
    last_entry: Option<String>,
}

impl HistoryFilter {
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            ignore_dups: config.ignore_dups,
            last_entry: None,
        }
    }

    /// Returns true if `line` should be added to history.
    ///
    /// Lines of sensitive commands (those that may carry a password) are
    /// never recorded.
    pub fn should_add(&mut self, line: &str, sensitive: bool) -> bool {
        let line = line.trim();
        if line.is_empty() || sensitive {
            return false;
        }

        if self.ignore_dups && self.last_entry.as_deref() == Some(line) {
            return false;
        }

        self.last_entry = Some(line.to_string());
        true
    }
}
