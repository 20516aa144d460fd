//! Extension allow-list for the scanner.

use super::ImageFormat;
use std::collections::HashSet;
use std::path::Path;

/// Extensions the organizer copies, lowercase, without the dot
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif", "heic"];

/// Decides whether a file is an image the organizer should pick up
pub struct ImageFilter {
    extensions: HashSet<String>,
    include_hidden: bool,
}

impl ImageFilter {
    /// Filter accepting [`IMAGE_EXTENSIONS`], hidden files included
    pub fn new() -> Self {
        Self {
            extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
        }
    }

    /// Include or skip dot-files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
