// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Simple Address Book
//!
//! A flat-file address book built to back a terminal mail client's
//! query command. Records live one per line in a tab-separated text
//! file; the whole collection is loaded into memory, queried or
//! appended to, and written back in one piece.
//!
//! # Features
//!
//! - Tab-delimited record codec with ad hoc key/value annotations
//! - Substring search across all searchable fields for autocomplete
//! - Field-filtered search and exact single-result name lookup
//! - Sender extraction from a raw message's From header, including
//!   nested comment stripping
//!
//! # Example
//!
//! ```rust
//! use addrbook::{AddressBook, ContactRecord};
//!
//! # fn main() -> addrbook::Result<()> {
//! let mut book = AddressBook::load(".", ".address_list")?;
//! book.append(ContactRecord::from_line(
//!     "donutlover@test.com\tJim Bagodonuts\tloves donuts",
//! )?);
//!
//! for record in book.substring_search("donut") {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```

mod book;
mod error;
mod record;
mod sender;

pub use book::{AddressBook, DEFAULT_FILE_NAME};
pub use error::{AddressError, Result};
pub use record::{ContactRecord, MAX_MISC_ENTRIES, format_misc};
pub use sender::{Sender, extract_sender, strip_paren_comments};
