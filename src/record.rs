//! Contact records and their tab-delimited line format

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AddressError, Result};

/// Upper bound on ad hoc key/value annotations per record
pub const MAX_MISC_ENTRIES: usize = 8;

/// A single address book entry
///
/// Stored as one tab-separated line:
///
/// ```text
/// donutlover@test.com\tJim Bagodonuts\tloves donuts
/// ```
///
/// The first three fields are what the mail client consumes for query
/// responses. `extra_info` and any misc annotations ride along in later
/// fields; the client ignores them, but searches still see `extra_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Email address, required
    pub email: String,

    /// Display name, required
    pub name: String,

    /// Free-text annotation shown by the mail client
    pub other_info: String,

    /// Free-text annotation stored and searched but never shown
    pub extra_info: String,

    /// Ad hoc key/value annotations, insertion order preserved
    misc: Vec<(String, String)>,
}

impl ContactRecord {
    /// Build a validated record
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        other_info: impl Into<String>,
        extra_info: impl Into<String>,
        misc: Vec<(String, String)>,
    ) -> Result<Self> {
        let record = Self {
            email: email.into(),
            name: name.into(),
            other_info: other_info.into(),
            extra_info: extra_info.into(),
            misc,
        };
        record.validate()?;
        Ok(record)
    }

    /// Decode one stored line
    ///
    /// The misc suffix normally starts at the fifth field, but an encoded
    /// record with empty `extra_info` carries no placeholder, so a fourth
    /// field shaped like `(key, value)` is read as misc instead of
    /// `extra_info`. That keeps decoding the inverse of encoding for
    /// every valid record.
    pub fn from_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(AddressError::MalformedRecord(line.to_string()));
        }

        let other_info = fields.get(2).copied().unwrap_or_default();
        let mut rest = fields.get(3..).unwrap_or_default();
        let mut extra_info = "";
        if let Some((&first, tail)) = rest.split_first()
            && !is_misc_field(first)
        {
            extra_info = first;
            rest = tail;
        }
        let misc = rest.iter().map(|field| parse_misc_field(field)).collect();

        Self::new(fields[0], fields[1], other_info, extra_info, misc)
    }

    /// Ad hoc annotations in insertion order
    #[must_use]
    pub fn misc(&self) -> &[(String, String)] {
        &self.misc
    }

    /// Current string value of a named field
    ///
    /// Misc keys are addressable by name; anything unrecognized reads as
    /// empty.
    #[must_use]
    pub fn field(&self, name: &str) -> &str {
        match name {
            "email" => &self.email,
            "name" => &self.name,
            "otherinfo" => &self.other_info,
            "extrainfo" => &self.extra_info,
            _ => self
                .misc
                .iter()
                .find(|(key, _)| key == name)
                .map_or("", |(_, value)| value),
        }
    }

    /// Whether `term` occurs in any searchable field
    ///
    /// Misc values are not searched.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        self.email.contains(term)
            || self.name.contains(term)
            || self.other_info.contains(term)
            || self.extra_info.contains(term)
    }

    fn validate(&self) -> Result<()> {
        if self.email.is_empty() || self.name.is_empty() {
            return Err(AddressError::Validation(
                "email address and name must both be given".into(),
            ));
        }
        if self.misc.len() > MAX_MISC_ENTRIES {
            return Err(AddressError::Validation(format!(
                "at most {MAX_MISC_ENTRIES} misc entries allowed, got {}",
                self.misc.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for ContactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.email, self.name, self.other_info)?;
        if !self.extra_info.is_empty() {
            write!(f, "\t{}", self.extra_info)?;
        }
        write!(f, "{}", format_misc(&self.misc))
    }
}

/// Serialize misc annotations into their tab-prefixed `(key, value)` chain
///
/// An empty slice yields an empty string.
#[must_use]
pub fn format_misc(misc: &[(String, String)]) -> String {
    misc.iter()
        .map(|(key, value)| format!("\t({key}, {value})"))
        .collect()
}

fn is_misc_field(field: &str) -> bool {
    field.starts_with('(') && field.ends_with(')')
}

/// Parse a `(key, value)` suffix field
///
/// A field with no comma decodes to a key with an empty value.
fn parse_misc_field(field: &str) -> (String, String) {
    let inner = field.strip_prefix('(').unwrap_or(field);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner.split_once(',').map_or_else(
        || (inner.trim().to_string(), String::new()),
        |(key, value)| (key.trim().to_string(), value.trim().to_string()),
    )
}
