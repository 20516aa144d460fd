//! # Dedup Module
//!
//! Tracks which content fingerprints a run has already seen.
//!
//! The index lives for exactly one run and is never persisted, so every run
//! starts with an empty set.

use crate::core::hasher::ContentFingerprint;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Outcome of offering a fingerprint to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sighting {
    /// First file with this content in the run
    FirstSeen,
    /// Content already claimed by an earlier file
    Duplicate,
}

/// Set of fingerprints seen so far in the current run
///
/// `classify` is a single critical section, so when several threads offer
/// the same fingerprint at once exactly one of them gets
/// [`Sighting::FirstSeen`].
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    seen: Mutex<HashSet<ContentFingerprint>>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert `fingerprint`
    pub fn classify(&self, fingerprint: ContentFingerprint) -> Sighting {
        // A panic elsewhere cannot leave the set half-updated; keep using it
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);

        if seen.insert(fingerprint) {
            Sighting::FirstSeen
        } else {
            Sighting::Duplicate
        }
    }

    pub fn contains(&self, fingerprint: &ContentFingerprint) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(fingerprint)
    }

    /// Number of distinct fingerprints recorded
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
