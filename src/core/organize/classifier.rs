//! Decides the destination of each photo.

use super::types::{Bucket, Destination};
use crate::core::dedup::DuplicateIndex;
use crate::core::hasher::{ContentFingerprint, ContentHasher};
use crate::core::metadata::{ClassificationYear, YearResolver, YearSource};
use crate::core::scanner::ImageFile;
use crate::error::{MetadataError, OrganizerError};

/// Per-file facts that do not depend on any other file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub year: ClassificationYear,
    pub year_source: YearSource,
    pub fingerprint: ContentFingerprint,
}

/// Combines year resolution, hashing and the run's duplicate index
///
/// Each classifier owns one [`DuplicateIndex`], so a fresh classifier means
/// a fresh run.
#[derive(Debug, Default)]
pub struct Classifier {
    index: DuplicateIndex,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the year and fingerprint of `file`
    ///
    /// Touches no shared state and can run on any thread.
    pub fn analyze(file: &ImageFile) -> Result<Analysis, OrganizerError> {
        let (year, year_source) =
            YearResolver::resolve(file).ok_or_else(|| MetadataError::NoDate {
                path: file.path.clone(),
            })?;
        let fingerprint = ContentHasher::hash_file(&file.path)?;

        Ok(Analysis {
            year,
            year_source,
            fingerprint,
        })
    }

    /// Offer an analyzed file to the index and pick its destination
    ///
    /// A duplicate keeps its own year, even when the first copy of its
    /// content was filed under another one.
    pub fn decide(&self, analysis: &Analysis) -> Destination {
        Destination {
            bucket: Bucket::from(self.index.classify(analysis.fingerprint)),
            year: analysis.year,
        }
    }

    /// `analyze` followed by `decide`
    pub fn classify(&self, file: &ImageFile) -> Result<Destination, OrganizerError> {
        let analysis = Self::analyze(file)?;
        Ok(self.decide(&analysis))
    }

    pub fn index(&self) -> &DuplicateIndex {
        &self.index
    }
}
