//! Event type definitions for progress reporting.

use crate::core::organize::Bucket;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by an organize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Scanning phase events
    Scan(ScanEvent),
    /// Classify-and-copy phase events
    Organize(OrganizeEvent),
    /// Run-level events
    Pipeline(PipelineEvent),
}

/// Events during the scanning phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { root: PathBuf },
    /// Progress update during scanning
    Progress(ScanProgress),
    /// A photo was found
    PhotoFound { path: PathBuf },
    /// An entry could not be read but scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_photos: usize },
}

/// Progress information during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Number of directories scanned so far
    pub directories_scanned: usize,
    /// Number of photos found so far
    pub photos_found: usize,
    /// Current directory being scanned
    pub current_path: PathBuf,
}

/// Events while photos are classified and copied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrganizeEvent {
    /// Processing has started
    Started { total_photos: usize },
    /// Progress update
    Progress(OrganizeProgress),
    /// A photo was copied into the destination tree
    PhotoCopied {
        source: PathBuf,
        destination: PathBuf,
        bucket: Bucket,
        year: i32,
    },
    /// A photo could not be processed; the run continues
    FileFailed { path: PathBuf, message: String },
    /// Processing completed
    Completed { copied: usize, failed: usize },
}

/// Progress information while organizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeProgress {
    /// Number of photos handled so far (copied or failed)
    pub completed: usize,
    /// Total number of photos to handle
    pub total: usize,
    /// Photo currently being handled
    pub current_path: PathBuf,
}

/// Run-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Run has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Run completed
    Completed { summary: PipelineSummary },
    /// Something went wrong that the user should hear about
    Error { message: String },
}

/// Phases of an organize run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Classifying,
    Copying,
    WritingLog,
}

/// Summary of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Total photos found
    pub total_photos: usize,
    /// Photos copied into `Photos/<year>`
    pub unique_count: usize,
    /// Photos copied into `PossibleDuplicates/<year>`
    pub duplicate_count: usize,
    /// Photos that could not be processed
    pub failed_count: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Classifying => write!(f, "Classifying"),
            PipelinePhase::Copying => write!(f, "Copying"),
            PipelinePhase::WritingLog => write!(f, "Writing log"),
        }
    }
}
