//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter};
use super::{ImageFile, ImageScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{Event, EventSender, ScanEvent, ScanProgress};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Directories never descended into (e.g. a destination inside the source)
    pub exclude: Vec<PathBuf>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            max_depth: None,
            exclude: Vec::new(),
        }
    }
}

/// Scanner implementation using the walkdir crate
///
/// Entries are visited sorted by file name so two runs over the same tree
/// see files in the same order.
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new().with_hidden(config.include_hidden);
        Self { config, filter }
    }

    fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        fs::canonicalize(root).map_err(|source| ScanError::ReadDirectory {
            path: root.to_path_buf(),
            source,
        })
    }

    fn walk(&self, root: &Path, events: &EventSender) -> Result<ScanResult, ScanError> {
        // Exclusions that do not exist yet cannot contain anything to skip
        let excluded: Vec<PathBuf> = self
            .config
            .exclude
            .iter()
            .filter_map(|p| fs::canonicalize(p).ok())
            .collect();

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker.into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            if !include_hidden && is_hidden(entry.path()) {
                return false;
            }
            !excluded.iter().any(|ex| ex == entry.path())
        });

        let mut photos = Vec::new();
        let mut errors = Vec::new();
        let mut directories_scanned = 0;

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let kind = e.io_error().map(|io| io.kind());

                    let error = if kind == Some(std::io::ErrorKind::PermissionDenied) {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::new(
                                kind.unwrap_or(std::io::ErrorKind::Other),
                                e.to_string(),
                            ),
                        }
                    };

                    // Nothing can be enumerated from an unreadable root
                    if e.depth() == 0 {
                        return Err(error);
                    }

                    tracing::warn!(path = %path.display(), error = %error, "skipping unreadable entry");
                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));
                    errors.push(error);
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_dir() {
                directories_scanned += 1;
                events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                    directories_scanned,
                    photos_found: photos.len(),
                    current_path: path.to_path_buf(),
                })));
                continue;
            }

            let file_type = entry.file_type();
            if !(file_type.is_file() || file_type.is_symlink()) || !self.filter.should_include(path)
            {
                continue;
            }

            // Unfollowed links are resolved here so a linked photo is copied
            // and a dangling one is reported
            let metadata = if file_type.is_symlink() {
                match fs::metadata(path) {
                    Ok(metadata) if metadata.is_file() => Ok(metadata),
                    Ok(_) => continue,
                    Err(source) => Err(ScanError::BrokenLink {
                        path: path.to_path_buf(),
                        source,
                    }),
                }
            } else {
                entry.metadata().map_err(|e| ScanError::ReadDirectory {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
                })
            };

            match metadata {
                Ok(metadata) => {
                    let photo = ImageFile {
                        path: path.to_path_buf(),
                        size: metadata.len(),
                        modified: metadata.modified().ok(),
                        format: self.filter.get_format(path),
                    };

                    events.send(Event::Scan(ScanEvent::PhotoFound {
                        path: photo.path.clone(),
                    }));
                    photos.push(photo);
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "skipping unreadable photo");
                    events.send(Event::Scan(ScanEvent::Error {
                        path: path.to_path_buf(),
                        message: error.to_string(),
                    }));
                    errors.push(error);
                }
            }
        }

        Ok(ScanResult { photos, errors })
    }
}

impl ImageScanner for WalkDirScanner {
    fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        self.scan_with_events(root, &crate::events::null_sender())
    }

    fn scan_with_events(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        let root = Self::resolve_root(root)?;

        events.send(Event::Scan(ScanEvent::Started { root: root.clone() }));

        let result = self.walk(&root, events)?;

        events.send(Event::Scan(ScanEvent::Completed {
            total_photos: result.photos.len(),
        }));

        Ok(result)
    }
}
