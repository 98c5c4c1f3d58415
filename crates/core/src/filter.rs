//! Search and status filtering over catalog entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CatalogError, FileStatus};

/// Status predicate: everything, or exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(FileStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: FileStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

impl From<FileStatus> for StatusFilter {
    fn from(status: FileStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Filter for catalog entries.
///
/// The search term is trimmed and matched case-insensitively against the
/// file name. An empty term matches every entry. Both predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    search: String,
    status: StatusFilter,
}

impl EntryFilter {
    /// A filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by file-name substring.
    pub fn with_search(mut self, search: impl AsRef<str>) -> Self {
        self.search = search.as_ref().trim().to_lowercase();
        self
    }

    /// Filter by status.
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let name_matches =
            self.search.is_empty() || entry.name.to_lowercase().contains(&self.search);
        name_matches && self.status.matches(entry.status)
    }

    /// Matching entries, cloned, in their original order.
    pub fn apply(&self, entries: &[CatalogEntry]) -> Vec<CatalogEntry> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Shorthand for `EntryFilter::new().with_search(search).with_status(status).apply(entries)`.
pub fn filter_entries(
    entries: &[CatalogEntry],
    search: &str,
    status: StatusFilter,
) -> Vec<CatalogEntry> {
    EntryFilter::new()
        .with_search(search)
        .with_status(status)
        .apply(entries)
}
