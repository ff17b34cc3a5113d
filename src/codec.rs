//! Fixed-size binary encoding of a single [`Entry`].
//!
//! A block is five fields of [`FIELD_CAPACITY`] bytes each, in the order
//! name, password, category, website, login. Each field holds UTF-8 text
//! padded with NUL bytes; a field that is exactly full has no terminator.
//!
//! The layout has no header or version tag. A store written with a different
//! field capacity is misread silently, so these constants must never change
//! for existing files.

use crate::entry::{Entry, SortField};

/// Bytes reserved for each field in a block.
pub const FIELD_CAPACITY: usize = 64;

/// Number of fields in a block.
pub const FIELD_COUNT: usize = SortField::ALL.len();

/// Size of one encoded entry on disk.
pub const BLOCK_SIZE: usize = FIELD_CAPACITY * FIELD_COUNT;

/// An encoded entry.
pub type Block = [u8; BLOCK_SIZE];

/// Returns the longest prefix of `value` that a field can hold.
///
/// The prefix stops at the first NUL and never splits a UTF-8 character.
pub fn fit(value: &str) -> &str {
    let value = match value.find('\0') {
        Some(nul) => &value[..nul],
        None => value,
    };

    if value.len() <= FIELD_CAPACITY {
        return value;
    }

    let mut end = FIELD_CAPACITY;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Encodes an entry into a block, truncating fields that do not fit.
pub fn encode(entry: &Entry) -> Block {
    let mut block = [0u8; BLOCK_SIZE];

    for (index, field) in SortField::ALL.into_iter().enumerate() {
        let bytes = fit(entry.field(field)).as_bytes();
        let offset = index * FIELD_CAPACITY;
        block[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    block
}

/// Decodes a block back into an entry.
///
/// Each field is read up to its first NUL byte. Invalid UTF-8 is replaced
/// rather than rejected, and the result is cut back to the field capacity so
/// that encoding it again gives the same entry.
pub fn decode(block: &Block) -> Entry {
    let mut entry = Entry::default();

    for (index, field) in SortField::ALL.into_iter().enumerate() {
        let raw = &block[index * FIELD_CAPACITY..(index + 1) * FIELD_CAPACITY];
        let len = raw.iter().position(|&b| b == 0).unwrap_or(FIELD_CAPACITY);
        // Replacement characters can push a field past its capacity.
        let value = String::from_utf8_lossy(&raw[..len]);
        entry.set_field(field, fit(&value));
    }

    entry
}
