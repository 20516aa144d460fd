//! Types for the organize module.

use crate::core::dedup::Sighting;
use crate::core::metadata::ClassificationYear;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Folder for photos whose content is new to the run
pub const PHOTOS_DIR: &str = "Photos";
/// Folder for byte-identical copies of an earlier photo
pub const DUPLICATES_DIR: &str = "PossibleDuplicates";
/// Name of the mapping log written at the destination root
pub const LOG_FILE_NAME: &str = "log_organizacion.txt";

/// Which top-level folder a photo lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Unique,
    Duplicate,
}

impl Bucket {
    pub fn dir_name(self) -> &'static str {
        match self {
            Bucket::Unique => PHOTOS_DIR,
            Bucket::Duplicate => DUPLICATES_DIR,
        }
    }
}

impl From<Sighting> for Bucket {
    fn from(sighting: Sighting) -> Self {
        match sighting {
            Sighting::FirstSeen => Bucket::Unique,
            Sighting::Duplicate => Bucket::Duplicate,
        }
    }
}

/// Where a photo belongs: bucket plus year
///
/// Only describes a folder; creating it and copying into it is the
/// executor's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub bucket: Bucket,
    pub year: ClassificationYear,
}

impl Destination {
    /// `<root>/<bucket>/<year>`
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(self.bucket.dir_name()).join(self.year.to_string())
    }
}

/// One line of the organization log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Absolute path of the original
    pub source: PathBuf,
    /// Folder the copy was written to
    pub directory: PathBuf,
    /// File name of the copy (same as the original's)
    pub file_name: String,
}

impl fmt::Display for LogEntry {
    /// `<source> => <directory>\<file_name>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} => {}\\{}",
            self.source.display(),
            self.directory.display(),
            self.file_name
        )
    }
}

/// A photo that could not be organized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Per-year counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: ClassificationYear,
    pub unique: usize,
    pub duplicates: usize,
}

/// Outcome of an organize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub run_id: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Images found under the source
    pub total_photos: usize,
    /// Copied into `Photos/<year>`
    pub unique_count: usize,
    /// Copied into `PossibleDuplicates/<year>`
    pub duplicate_count: usize,
    /// Years that came from EXIF rather than the modification time
    pub dated_from_exif: usize,
    pub folders_created: usize,
    pub by_year: Vec<YearSummary>,
    pub failures: Vec<FileFailure>,
    pub log_path: PathBuf,
    /// Set when the log could not be written; the copies still stand
    pub log_error: Option<String>,
    /// The destination already existed inside the source and was not scanned
    pub destination_in_source: bool,
    pub duration_ms: u64,
}

impl OrganizeReport {
    /// Photos actually copied
    pub fn copied_count(&self) -> usize {
        self.unique_count + self.duplicate_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sighting_maps_to_bucket() {
        assert_eq!(Bucket::from(Sighting::FirstSeen), Bucket::Unique);
        assert_eq!(Bucket::from(Sighting::Duplicate), Bucket::Duplicate);
    }

    #[test]
    fn destination_directory_layout() {
        let root = Path::new("/dest");
        let unique = Destination {
            bucket: Bucket::Unique,
            year: ClassificationYear::new(2020),
        };
        let duplicate = Destination {
            bucket: Bucket::Duplicate,
            year: ClassificationYear::new(2021),
        };

        assert_eq!(unique.directory(root), PathBuf::from("/dest/Photos/2020"));
        assert_eq!(
            duplicate.directory(root),
            PathBuf::from("/dest/PossibleDuplicates/2021")
        );
    }

    #[test]
    fn log_entry_line_format() {
        let entry = LogEntry {
            source: PathBuf::from("/src/trip/a.jpg"),
            directory: PathBuf::from("/dest/Photos/2020"),
            file_name: "a.jpg".to_string(),
        };

        assert_eq!(entry.to_string(), "/src/trip/a.jpg => /dest/Photos/2020\\a.jpg");
    }

    #[test]
    fn year_serializes_as_plain_number() {
        let summary = YearSummary {
            year: ClassificationYear::new(2019),
            unique: 3,
            duplicates: 1,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"year\":2019"));
    }
}
