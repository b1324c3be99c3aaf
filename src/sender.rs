//! Sender extraction from raw email messages

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AddressError, Result};

// Innermost comment span plus one trailing space, so removal does not
// leave doubled spaces inside display names.
static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\) ?").unwrap());

/// Display name and address recovered from a message's From header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Display name, possibly empty
    pub name: String,

    /// Bare email address without angle brackets
    pub address: String,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "{} <{}>", self.name, self.address)
        }
    }
}

/// Pull the sender out of a raw email message
///
/// The From header may carry parenthesized comments, possibly nested, as
/// in `david (the bomb) lowry-duda <myemail@(stupid)place.com>`; these
/// are stripped before the address is split out of its angle brackets.
pub fn extract_sender(raw: &str) -> Result<Sender> {
    if raw.len() < 2 {
        return Err(AddressError::Parse("message is too short".into()));
    }

    let parsed =
        mailparse::parse_mail(raw.as_bytes()).map_err(|e| AddressError::Parse(e.to_string()))?;
    let mut from = parsed
        .headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == "from")
        .map(mailparse::MailHeader::get_value)
        .ok_or_else(|| AddressError::Parse("missing From header".into()))?;

    if raw.contains('(') {
        from = strip_paren_comments(&from);
    }

    let Some(pos) = from.find('<') else {
        return Err(AddressError::NoAddressFound(from));
    };
    let name = from[..pos].trim();
    let address = from[pos + 1..].trim();
    let address = address.strip_suffix('>').unwrap_or(address).trim();

    let sender = Sender {
        name: name.to_string(),
        address: address.to_string(),
    };
    debug!("Extracted sender {}", sender);
    Ok(sender)
}

/// Remove parenthesized comment spans, innermost first
///
/// Runs to a fixed point so adjacent and nested comments all go. Each
/// pass deletes spans holding no nested parenthesis; a stray `(` with no
/// closing partner stops the loop instead of spinning.
#[must_use]
pub fn strip_paren_comments(text: &str) -> String {
    let mut current = text.to_string();
    while current.contains('(') {
        let next = COMMENT_REGEX.replace_all(&current, "").into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
}
