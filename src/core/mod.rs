//! # Core Module
//!
//! The GUI-agnostic organizing engine.
//!
//! ## Modules
//! - `scanner` - Discovers images under the source folder
//! - `metadata` - Resolves the year a photo belongs to
//! - `hasher` - Fingerprints file content
//! - `dedup` - Remembers fingerprints seen during a run
//! - `organize` - Classifies, copies and logs each photo
//! - `pipeline` - Orchestrates the full run

pub mod dedup;
pub mod hasher;
pub mod metadata;
pub mod organize;
pub mod pipeline;
pub mod scanner;

// Re-export commonly used types
pub use dedup::{DuplicateIndex, Sighting};
pub use hasher::{ContentFingerprint, ContentHasher};
pub use metadata::{ClassificationYear, YearResolver};
pub use organize::{Bucket, Classifier, Destination, OrganizeReport};
pub use pipeline::Organizer;
pub use scanner::ImageFile;
