use anyhow::{Result, anyhow};
use std::path::PathBuf;

const DATA_DIR_NAME: &str = ".passvault";
const DB_FILE_NAME: &str = "passwords.dat";
const LOG_FILE_NAME: &str = "passvault.log";
const HISTORY_FILE_NAME: &str = "history";

/// File locations used by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub history_path: PathBuf,
}

impl AppConfig {
    /// Resolves the default locations under `~/.passvault`.
    pub fn from_home() -> Result<Self> {
        let home =
            dirs_next::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::in_dir(home.join(DATA_DIR_NAME)))
    }

    /// Places every file inside `data_dir`.
    pub fn in_dir(data_dir: PathBuf) -> Self {
        Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            history_path: data_dir.join(HISTORY_FILE_NAME),
            data_dir,
        }
    }

    /// Uses a store file other than the default one.
    pub fn with_db_path(mut self, path: PathBuf) -> Self {
        self.db_path = path;
        self
    }

    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}
