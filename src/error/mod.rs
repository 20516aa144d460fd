//! # Error Module
//!
//! User-friendly error types for the photo organizer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-file errors stay per-file** - only an unusable source folder ends a run
//!
//! A photo whose EXIF data cannot be read is dated by its modification time
//! instead. [`MetadataError`] only covers a photo with neither.
//!
//! [`JournalError`] never ends a run; the organizer reports it next to the
//! finished copies instead of returning it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Copy error: {0}")]
    Copy(#[from] CopyError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

/// Errors that occur while discovering photos
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Link {path} points to a missing or unreadable file: {source}")]
    BrokenLink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error is about
    pub fn path(&self) -> &Path {
        match self {
            ScanError::DirectoryNotFound { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirectory { path, .. }
            | ScanError::BrokenLink { path, .. } => path,
        }
    }
}

/// Errors that occur while working out a photo's year
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("No capture date and no modification time for {path}")]
    NoDate { path: PathBuf },
}

/// Errors that occur while fingerprinting file content
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while placing a photo in the destination tree
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Failed to create folder {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File has no name: {path}")]
    MissingFileName { path: PathBuf },
}

/// Errors that occur while writing the organization log
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to write log {path}: {source}. Copied photos were kept.")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, OrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::DirectoryNotFound {
            path: PathBuf::from("/photos/vacation"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/vacation"));
    }

    #[test]
    fn hash_error_includes_path_and_cause() {
        let error = HashError::IoError {
            path: PathBuf::from("/photos/locked.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/locked.jpg"));
        assert!(message.contains("access denied"));
    }

    #[test]
    fn copy_error_names_both_ends() {
        let error = CopyError::Copy {
            from: PathBuf::from("/src/a.jpg"),
            to: PathBuf::from("/dest/Photos/2020/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let message = error.to_string();
        assert!(message.contains("/src/a.jpg"));
        assert!(message.contains("/dest/Photos/2020/a.jpg"));
        assert!(message.contains("disk full"));
    }

    #[test]
    fn journal_error_reassures_about_copies() {
        let error = JournalError::Write {
            path: PathBuf::from("/dest/log_organizacion.txt"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "read-only"),
        };
        assert!(error.to_string().contains("Copied photos were kept"));
    }

    #[test]
    fn metadata_error_names_the_photo() {
        let error: OrganizerError = MetadataError::NoDate {
            path: PathBuf::from("/photos/undated.png"),
        }
        .into();
        assert!(error.to_string().contains("/photos/undated.png"));
    }

    #[test]
    fn phase_errors_convert_into_top_level() {
        let error: OrganizerError = ScanError::DirectoryNotFound {
            path: PathBuf::from("/missing"),
        }
        .into();
        assert!(matches!(error, OrganizerError::Scan(_)));
        assert!(error.to_string().starts_with("Scanning error"));
    }
}
