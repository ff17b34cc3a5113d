//! Random password generation.
//!
//! Characters are drawn uniformly, with replacement, from the pool of the
//! selected classes. There is no guarantee that every selected class shows
//! up in the result. The thread RNG is seeded from the OS, which is plenty
//! for suggesting passwords but this is not a vetted security primitive.

use anyhow::{Result, anyhow};
use rand::Rng;

pub const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub const SPECIAL_CHARS: &str = "!@#$%^&*()-+=~`;:'?/";

/// Largest length accepted from user input.
pub const MAX_LENGTH: usize = 1024;

/// Which character classes a generated password may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharClasses {
    pub upper: bool,
    pub lower: bool,
    pub special: bool,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self::all()
    }
}

impl CharClasses {
    pub fn all() -> Self {
        Self {
            upper: true,
            lower: true,
            special: true,
        }
    }

    pub fn none() -> Self {
        Self {
            upper: false,
            lower: false,
            special: false,
        }
    }

    /// Parses a class selector such as `"uls"` or `"l"`.
    ///
    /// `u` selects uppercase, `l` lowercase and `s` special characters.
    pub fn parse(selector: &str) -> Result<Self> {
        let mut classes = Self::none();
        for ch in selector.chars() {
            match ch {
                'u' | 'U' => classes.upper = true,
                'l' | 'L' => classes.lower = true,
                's' | 'S' => classes.special = true,
                other => {
                    return Err(anyhow!(
                        "Unknown character class '{}' (use u, l and s)",
                        other
                    ));
                }
            }
        }
        Ok(classes)
    }

    /// Concatenates the selected alphabets: uppercase, lowercase, special.
    pub fn pool(&self) -> String {
        let mut pool = String::new();
        if self.upper {
            pool.push_str(UPPER_CHARS);
        }
        if self.lower {
            pool.push_str(LOWER_CHARS);
        }
        if self.special {
            pool.push_str(SPECIAL_CHARS);
        }
        pool
    }
}

/// Generates a password of `length` characters from the selected classes.
///
/// Returns an empty string when `length` is zero or no class is selected.
pub fn generate(length: usize, classes: CharClasses) -> String {
    let pool: Vec<char> = classes.pool().chars().collect();
    if pool.is_empty() || length == 0 {
        return String::new();
    }

    let mut rng = rand::rng();
    (0..length)
        .map(|_| pool[rng.random_range(0..pool.len())])
        .collect()
}
