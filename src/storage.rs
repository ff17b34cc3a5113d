use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::codec::{self, BLOCK_SIZE, Block};
use crate::entry::Entry;

/// Result of reading a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file does not exist yet.
    Missing,
    /// The file was read. `discarded_bytes` is the size of a trailing
    /// partial block that could not be decoded.
    Loaded {
        entries: Vec<Entry>,
        discarded_bytes: usize,
    },
}

/// Reads every complete block from `path`.
pub fn load_entries(path: &Path) -> Result<LoadOutcome> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("Store file {} does not exist", path.display());
            return Ok(LoadOutcome::Missing);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let chunks = bytes.chunks_exact(BLOCK_SIZE);
    let discarded_bytes = chunks.remainder().len();
    let entries: Vec<Entry> = chunks
        .map(|chunk| {
            let mut block: Block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            codec::decode(&block)
        })
        .collect();

    if discarded_bytes > 0 {
        log::warn!(
            "{} is not a whole number of {}-byte blocks; ignored {} trailing bytes",
            path.display(),
            BLOCK_SIZE,
            discarded_bytes
        );
    }

    log::debug!("Read {} entries from {}", entries.len(), path.display());

    Ok(LoadOutcome::Loaded {
        entries,
        discarded_bytes,
    })
}

/// Rewrites `path` with one block per entry, in order.
///
/// The blocks go to a sibling temporary file that is renamed over `path`
/// once fully written. The temporary file is removed if anything fails.
pub fn save_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let tmp_path = temp_path(path);
    let replaced = write_blocks(&tmp_path, entries)
        .with_context(|| format!("Failed to write {}", tmp_path.display()))
        .and_then(|()| {
            fs::rename(&tmp_path, path)
                .with_context(|| format!("Failed to replace {}", path.display()))
        });
    if let Err(e) = replaced {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    log::debug!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

fn write_blocks(path: &Path, entries: &[Entry]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for entry in entries {
        writer.write_all(&codec::encode(entry))?;
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
