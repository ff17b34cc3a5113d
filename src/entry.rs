//! The password entry record and the fields it can be sorted by.

use anyhow::{Result, anyhow};
use std::fmt;
use std::str::FromStr;

use crate::codec;

/// One stored credential.
///
/// `name` is the lookup key used by the manager but is not required to be
/// unique. `website` and `login` are optional and empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    pub name: String,
    pub password: String,
    pub category: String,
    pub website: String,
    pub login: String,
}

impl Entry {
    /// Creates an entry with only a name and a password.
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the website.
    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }

    /// Sets the login.
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }

    /// Returns the value of a single field.
    pub fn field(&self, field: SortField) -> &str {
        match field {
            SortField::Name => &self.name,
            SortField::Password => &self.password,
            SortField::Category => &self.category,
            SortField::Website => &self.website,
            SortField::Login => &self.login,
        }
    }

    fn field_mut(&mut self, field: SortField) -> &mut String {
        match field {
            SortField::Name => &mut self.name,
            SortField::Password => &mut self.password,
            SortField::Category => &mut self.category,
            SortField::Website => &mut self.website,
            SortField::Login => &mut self.login,
        }
    }

    /// Replaces a single field with a new value.
    pub fn set_field(&mut self, field: SortField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Returns true if `query` is a substring of any field (case-sensitive).
    pub fn matches(&self, query: &str) -> bool {
        SortField::ALL
            .iter()
            .any(|&field| self.field(field).contains(query))
    }

    /// Returns a copy cut down to what a block can hold, and whether any
    /// field had to be shortened.
    pub fn fit_to_block(&self) -> (Entry, bool) {
        let mut fitted = self.clone();
        let mut truncated = false;

        for field in SortField::ALL {
            let value = fitted.field_mut(field);
            let kept = codec::fit(value).len();
            if kept < value.len() {
                value.truncate(kept);
                truncated = true;
            }
        }

        (fitted, truncated)
    }
}

/// A field of [`Entry`], in block order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Password,
    Category,
    Website,
    Login,
}

impl SortField {
    /// Every field, in the order they are laid out in a block.
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::Password,
        SortField::Category,
        SortField::Website,
        SortField::Login,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Password => "password",
            SortField::Category => "category",
            SortField::Website => "website",
            SortField::Login => "login",
        }
    }
}

impl FromStr for SortField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown field '{}'", s))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name:     {}", self.name)?;
        writeln!(f, "Password: {}", self.password)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Website:  {}", self.website)?;
        write!(f, "Login:    {}", self.login)
    }
}
