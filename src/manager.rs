//! The entry manager: the in-memory store and every operation on it.
//!
//! The manager owns the list of entries and the list of categories and is
//! the only thing that mutates them. Every mutation rewrites the store file
//! before returning. Categories are derived from the entries at load time
//! and are never written to disk themselves.

use anyhow::Result;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::entry::{Entry, SortField};
use crate::generator::{self, CharClasses};
use crate::storage::{self, LoadOutcome};

/// How the store looked when the manager was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No store file existed; the manager started empty.
    Missing,
    /// The store file was read.
    Loaded {
        entries: usize,
        discarded_bytes: usize,
    },
}

pub struct Manager {
    path: PathBuf,
    entries: Vec<Entry>,
    categories: Vec<String>,
    load_status: LoadStatus,
}

impl Manager {
    /// Opens the store at `path`.
    ///
    /// A missing file is not an error: the manager starts empty and
    /// [`load_status`](Self::load_status) reports [`LoadStatus::Missing`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut manager = Self {
            path,
            entries: Vec::new(),
            categories: Vec::new(),
            load_status: LoadStatus::Missing,
        };

        match storage::load_entries(&manager.path)? {
            LoadOutcome::Missing => {
                log::info!(
                    "No store at {}, starting with an empty list",
                    manager.path.display()
                );
            }
            LoadOutcome::Loaded {
                entries,
                discarded_bytes,
            } => {
                manager.load_status = LoadStatus::Loaded {
                    entries: entries.len(),
                    discarded_bytes,
                };
                manager.entries = entries;
                manager.rebuild_categories();
                log::info!(
                    "Loaded {} entries in {} categories from {}",
                    manager.entries.len(),
                    manager.categories.len(),
                    manager.path.display()
                );
            }
        }

        Ok(manager)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry with the given name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Appends an entry and saves.
    ///
    /// Names are not checked for uniqueness.
    pub fn add(&mut self, entry: Entry) -> Result<()> {
        let entry = fit(entry);
        log::debug!("Adding entry '{}'", entry.name);

        self.register_category(&entry.category);
        self.entries.push(entry);
        self.save()
    }

    /// Replaces the first entry named `name` with `entry` and saves.
    ///
    /// Every field is overwritten, so this can rename. Returns `false`
    /// without touching anything when no entry has that name.
    pub fn edit(&mut self, name: &str, entry: Entry) -> Result<bool> {
        let Some(index) = self.entries.iter().position(|e| e.name == name) else {
            log::debug!("Edit target '{}' not found", name);
            return Ok(false);
        };

        let entry = fit(entry);
        log::debug!("Editing entry '{}' (now '{}')", name, entry.name);

        self.register_category(&entry.category);
        self.entries[index] = entry;
        self.save()?;
        Ok(true)
    }

    /// Removes every entry named `name`.
    ///
    /// Saves and returns `true` only if at least one entry was removed.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.name != name);
        let removed = before - self.entries.len();

        if removed == 0 {
            log::debug!("Remove target '{}' not found", name);
            return Ok(false);
        }

        log::debug!("Removed {} entries named '{}'", removed, name);
        self.save()?;
        Ok(true)
    }

    /// Entries with `query` as a substring of any field, in stored order.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.matches(query)).collect()
    }

    /// All entries ordered by `fields`, first field being the primary key.
    ///
    /// Unknown field names are ignored. Ties that no key breaks keep their
    /// stored order. The stored order itself is never changed.
    pub fn sorted_view(&self, fields: &[&str]) -> Vec<&Entry> {
        let keys: Vec<SortField> = fields.iter().filter_map(|f| f.parse().ok()).collect();

        let mut view: Vec<&Entry> = self.entries.iter().collect();
        view.sort_by(|a, b| {
            keys.iter()
                .map(|&key| a.field(key).cmp(b.field(key)))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        view
    }

    /// Returns true if some entry already uses exactly this password.
    pub fn is_password_used(&self, password: &str) -> bool {
        self.entries.iter().any(|e| e.password == password)
    }

    /// Categories in the order they were first seen or added.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Adds an empty category.
    ///
    /// This is not saved: a category with no entries is gone after a reload.
    pub fn add_category(&mut self, name: &str) {
        if self.register_category(name) {
            log::debug!("Added category '{}'", name);
        }
    }

    /// Removes a category together with every entry in it, then saves.
    ///
    /// Returns the number of entries removed. An empty name does nothing.
    pub fn remove_category(&mut self, name: &str) -> Result<usize> {
        if name.is_empty() {
            return Ok(0);
        }

        let before = self.entries.len();
        self.entries.retain(|e| e.category != name);
        let removed = before - self.entries.len();
        self.categories.retain(|c| c != name);

        log::debug!("Removed category '{}' and {} entries", name, removed);
        self.save()?;
        Ok(removed)
    }

    /// Generates a password. See [`generator::generate`].
    pub fn generate_password(
        &self,
        length: usize,
        upper: bool,
        lower: bool,
        special: bool,
    ) -> String {
        generator::generate(
            length,
            CharClasses {
                upper,
                lower,
                special,
            },
        )
    }

    fn register_category(&mut self, name: &str) -> bool {
        if name.is_empty() || self.categories.iter().any(|c| c == name) {
            return false;
        }
        self.categories.push(name.to_string());
        true
    }

    fn rebuild_categories(&mut self) {
        let mut categories: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !entry.category.is_empty() && !categories.contains(&entry.category) {
                categories.push(entry.category.clone());
            }
        }
        self.categories = categories;
    }

    fn save(&self) -> Result<()> {
        storage::save_entries(&self.path, &self.entries).inspect_err(|e| {
            log::error!("Failed to save {}: {}", self.path.display(), e);
        })
    }
}

fn fit(entry: Entry) -> Entry {
    let (fitted, truncated) = entry.fit_to_block();
    if truncated {
        log::warn!(
            "Entry '{}' had fields longer than the store allows; they were shortened",
            fitted.name
        );
    }
    fitted
}
