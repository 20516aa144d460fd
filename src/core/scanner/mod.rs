//! # Scanner Module
//!
//! Discovers image files under a source folder.
//!
//! ## Supported Formats
//! Matched by extension, case-insensitively:
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - BMP (.bmp)
//! - TIFF (.tiff)
//! - GIF (.gif)
//! - HEIC (.heic) - iPhone photos
//!
//! Anything else (documents, videos, `.tif`, `.heif`) is never enumerated.
//!
//! ## Example
//! ```rust,ignore
//! use photo_organizer::core::scanner::{ImageScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let found = scanner.scan(Path::new("/Users/me/Pictures"))?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An image discovered under the source folder
///
/// Never mutated after discovery; the organizer only reads from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modified time, `None` when the filesystem cannot report it
    pub modified: Option<SystemTime>,
    /// Format implied by the extension
    pub format: ImageFormat,
}

impl ImageFile {
    /// Build an `ImageFile` by reading the file's metadata.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown);

        Ok(Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
            format,
            path,
        })
    }

    /// Final path component, as copied into the destination
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
    Heic,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "bmp" => ImageFormat::Bmp,
            "tiff" => ImageFormat::Tiff,
            "gif" => ImageFormat::Gif,
            "heic" => ImageFormat::Heic,
            _ => ImageFormat::Unknown,
        }
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Discovered images, in traversal order
    pub photos: Vec<ImageFile>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for image scanners
///
/// Implement this trait to feed the organizer from somewhere other than
/// the filesystem walker (e.g., for testing).
pub trait ImageScanner: Send + Sync {
    /// Scan a source folder and return discovered images
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError>;

    /// Scan with progress reporting via events
    fn scan_with_events(&self, root: &Path, events: &EventSender)
        -> Result<ScanResult, ScanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_format_from_extension_lowercase() {
        assert_eq!(ImageFormat::from_extension("jpg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("jpeg"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("png"), ImageFormat::Png);
        assert_eq!(ImageFormat::from_extension("heic"), ImageFormat::Heic);
        assert_eq!(ImageFormat::from_extension("tiff"), ImageFormat::Tiff);
    }

    #[test]
    fn image_format_from_extension_uppercase() {
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("BMP"), ImageFormat::Bmp);
        assert_eq!(ImageFormat::from_extension("HEIC"), ImageFormat::Heic);
    }

    #[test]
    fn extensions_outside_the_list_are_unknown() {
        assert_eq!(ImageFormat::from_extension("txt"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_extension("tif"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_extension("webp"), ImageFormat::Unknown);
        assert!(!ImageFormat::Unknown.is_supported());
        assert!(ImageFormat::Gif.is_supported());
    }

    #[test]
    fn image_file_from_path_reads_metadata() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("IMG_0001.JPG");
        std::fs::write(&path, b"12345").unwrap();

        let file = ImageFile::from_path(&path).unwrap();

        assert_eq!(file.size, 5);
        assert!(file.modified.is_some());
        assert_eq!(file.format, ImageFormat::Jpeg);
        assert_eq!(file.file_name().unwrap(), "IMG_0001.JPG");
    }
}
