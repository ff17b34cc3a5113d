//! Passvault - a plain-file password entry store.
//!
//! This library provides the core of the passvault password manager: the
//! fixed-width record codec, file persistence, the entry manager with its
//! search, sort and category operations, a password generator, and a
//! shell-like interactive interface.

pub mod codec;
pub mod config;
pub mod entry;
pub mod generator;
pub mod logging;
pub mod manager;
pub mod shell;
pub mod storage;
pub mod trie;

// Re-export commonly used types
pub use config::AppConfig;
pub use entry::{Entry, SortField};
pub use generator::{CharClasses, generate};
pub use logging::{LogConfig, init_logging};
pub use manager::{LoadStatus, Manager};
pub use shell::Shell;
pub use trie::Trie;
