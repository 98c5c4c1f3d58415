//! Types for the chart catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation status a user has assigned to a chart file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FileStatus {
    /// Not yet tried in game.
    #[default]
    Untested,
    /// Loads and plays correctly.
    Good,
    /// Broken or unplayable.
    Bad,
    /// Packaged for the wrong platform or format.
    WrongFormat,
}

impl FileStatus {
    /// All statuses, in display order.
    pub const ALL: [FileStatus; 4] = [
        FileStatus::Untested,
        FileStatus::Good,
        FileStatus::Bad,
        FileStatus::WrongFormat,
    ];

    /// Returns the wire name (`untested`, `good`, `bad`, `wrongFormat`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Untested => "untested",
            FileStatus::Good => "good",
            FileStatus::Bad => "bad",
            FileStatus::WrongFormat => "wrongFormat",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Untested => "Untested",
            FileStatus::Good => "Good",
            FileStatus::Bad => "Bad",
            FileStatus::WrongFormat => "Wrong Format",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownStatus(s.to_string()))
    }
}

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Opaque identifier, assigned at creation.
    pub id: String,
    /// File name (e.g. `song-artist_p.psarc`).
    #[serde(rename = "fileName")]
    pub name: String,
    /// Current validation status.
    pub status: FileStatus,
    /// When the entry was added.
    #[serde(rename = "dateAdded")]
    pub created_at: DateTime<Utc>,
    /// When the status last changed.
    #[serde(rename = "lastModified")]
    pub modified_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// Create a fresh `untested` entry stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: generate_id(now),
            name: name.into(),
            status: FileStatus::Untested,
            created_at: now,
            modified_at: now,
        }
    }

    /// Overwrite the status and bump `modified_at`.
    ///
    /// `modified_at` never moves before `created_at`, even if the wall clock
    /// stepped backwards.
    pub fn set_status(&mut self, status: FileStatus) {
        self.status = status;
        self.modified_at = now_millis().max(self.created_at);
    }
}

/// Current UTC time truncated to whole milliseconds.
///
/// The persisted text form carries milliseconds, so truncating here keeps a
/// save/load round trip lossless.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Build an id from the creation time and a random 128-bit suffix.
///
/// Collisions are improbable but not ruled out.
fn generate_id(created_at: DateTime<Utc>) -> String {
    format!(
        "{}-{}",
        created_at.timestamp_millis(),
        Uuid::new_v4().simple()
    )
}

/// Entries added by a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Newly created entries, in input order.
    pub added: Vec<CatalogEntry>,
    /// Names that were refused because they already existed.
    pub duplicates: Vec<String>,
}

/// Number of entries per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub total: usize,
    pub untested: usize,
    pub good: usize,
    pub bad: usize,
    pub wrong_format: usize,
}

impl StatusCounts {
    /// Count a single status.
    pub fn record(&mut self, status: FileStatus) {
        self.total += 1;
        match status {
            FileStatus::Untested => self.untested += 1,
            FileStatus::Good => self.good += 1,
            FileStatus::Bad => self.bad += 1,
            FileStatus::WrongFormat => self.wrong_format += 1,
        }
    }
}

/// Errors for catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("File name cannot be empty")]
    EmptyName,

    #[error("File '{0}' already exists")]
    DuplicateName(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}
