//! Error types for address book operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while decoding, querying, or persisting addresses
#[derive(Error, Debug)]
pub enum AddressError {
    /// A record failed validation
    #[error("Invalid record: {0}")]
    Validation(String),

    /// A stored line could not be decoded into a record
    #[error("Malformed record line: {0}")]
    MalformedRecord(String),

    /// The backing file path is occupied by a directory
    #[error("Address file path is a directory: {}", .0.display())]
    InvalidStore(PathBuf),

    /// An exact lookup matched nothing
    #[error("No entry found for: {0}")]
    NotFound(String),

    /// An exact lookup matched more than one entry
    #[error("Multiple entries found for: {0}")]
    AmbiguousMatch(String),

    /// A filtered search eliminated every record
    #[error("No records matched the given criteria")]
    NoMatches,

    /// Failed to parse a raw email message
    #[error("Failed to parse message: {0}")]
    Parse(String),

    /// The From header carried no angle-bracketed address
    #[error("No address found in: {0}")]
    NoAddressFound(String),

    /// Reading or writing the backing file failed
    #[error("Address file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for address book operations
pub type Result<T> = std::result::Result<T, AddressError>;
