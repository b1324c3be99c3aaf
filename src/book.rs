//! The file-backed address collection

use std::fs;
use std::path::{Path, PathBuf, absolute};

use tracing::debug;

use crate::error::{AddressError, Result};
use crate::record::ContactRecord;

/// Default file name for the backing store
pub const DEFAULT_FILE_NAME: &str = ".address_list";

/// An ordered collection of contact records bound to a backing file
///
/// The whole file is read on load and rewritten on persist; there are no
/// incremental writes, and a concurrent writer's full rewrite simply
/// wins. Duplicate email addresses are allowed; running the file through
/// `uniq` is the expected dedup story.
#[derive(Debug)]
pub struct AddressBook {
    path: PathBuf,
    records: Vec<ContactRecord>,
}

impl AddressBook {
    /// Read the collection stored at `dir`/`filename`
    ///
    /// A missing file yields an empty collection. Any line that fails to
    /// decode aborts the whole load.
    pub fn load(dir: impl AsRef<Path>, filename: &str) -> Result<Self> {
        let path = absolute(dir.as_ref())?.join(filename);
        if path.is_dir() {
            return Err(AddressError::InvalidStore(path));
        }

        let mut records = Vec::new();
        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            for line in contents.lines() {
                let line = line.trim_end();
                if line.is_empty() {
                    continue;
                }
                records.push(ContactRecord::from_line(line)?);
            }
        }

        debug!("Loaded {} records from {}", records.len(), path.display());
        Ok(Self { path, records })
    }

    /// Absolute path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in insertion order
    #[must_use]
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record; duplicates are not checked
    pub fn append(&mut self, record: ContactRecord) {
        self.records.push(record);
    }

    /// The unique record whose name contains `name`
    pub fn lookup(&self, name: &str) -> Result<&ContactRecord> {
        let mut matches = self.records.iter().filter(|r| r.name.contains(name));
        let first = matches
            .next()
            .ok_or_else(|| AddressError::NotFound(name.to_string()))?;
        if matches.next().is_some() {
            return Err(AddressError::AmbiguousMatch(name.to_string()));
        }
        Ok(first)
    }

    /// Narrow the collection through `(field, substring)` criteria in order
    ///
    /// Fields are addressed by name (`email`, `name`, `otherinfo`,
    /// `extrainfo`, or a misc key); an unrecognized field reads as empty.
    /// Every criterion must leave at least one survivor; a step that
    /// eliminates all remaining records fails the whole call.
    pub fn filtered_search(&self, criteria: &[(&str, &str)]) -> Result<Vec<&ContactRecord>> {
        let mut survivors: Vec<&ContactRecord> = self.records.iter().collect();
        for (field, substring) in criteria {
            survivors.retain(|record| record.field(field).contains(substring));
            if survivors.is_empty() {
                return Err(AddressError::NoMatches);
            }
        }
        Ok(survivors)
    }

    /// Every record containing `term` in a searchable field
    ///
    /// Unlike [`Self::filtered_search`], no match here is an empty result,
    /// not a failure.
    #[must_use]
    pub fn substring_search(&self, term: &str) -> Vec<&ContactRecord> {
        self.records.iter().filter(|r| r.matches(term)).collect()
    }

    /// Overwrite the backing file with the current records
    ///
    /// An empty collection leaves the file alone: nothing is created and
    /// an existing file is not truncated.
    pub fn persist(&self) -> Result<()> {
        if self.path.is_dir() {
            return Err(AddressError::InvalidStore(self.path.clone()));
        }
        if self.records.is_empty() {
            debug!("Nothing to persist, leaving {} untouched", self.path.display());
            return Ok(());
        }

        let mut contents = String::new();
        for record in &self.records {
            contents.push_str(&record.to_string());
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;

        debug!("Wrote {} records to {}", self.records.len(), self.path.display());
        Ok(())
    }
}
