//! # Hasher Module
//!
//! Fingerprints file content for exact duplicate detection.
//!
//! The whole file is streamed through SHA-256, so two files share a
//! fingerprint exactly when their bytes are identical. Names, paths and
//! timestamps play no part.
//!
//! ## Example
//! ```rust,ignore
//! use photo_organizer::core::hasher::ContentHasher;
//!
//! let fingerprint = ContentHasher::hash_file(&path)?;
//! println!("{}", fingerprint); // 64 hex characters
//! ```

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read buffer size (8KB)
const BUFFER_SIZE: usize = 8192;

/// SHA-256 digest of a file's full content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentFingerprint([u8; 32]);

impl ContentFingerprint {
    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Computes [`ContentFingerprint`]s
pub struct ContentHasher;

impl ContentHasher {
    /// Fingerprint the file at `path`
    ///
    /// The handle is closed before returning, on success and on error.
    pub fn hash_file(path: &Path) -> Result<ContentFingerprint, HashError> {
        let io_error = |source| HashError::IoError {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        Self::hash_reader(BufReader::new(file)).map_err(io_error)
    }

    /// Fingerprint everything `reader` yields until EOF
    pub fn hash_reader<R: Read>(mut reader: R) -> std::io::Result<ContentFingerprint> {
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; BUFFER_SIZE];

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(ContentFingerprint(hasher.finalize().into()))
    }

    /// Fingerprint an in-memory buffer
    pub fn hash_bytes(bytes: &[u8]) -> ContentFingerprint {
        ContentFingerprint(Sha256::digest(bytes).into())
    }
}
