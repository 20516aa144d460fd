//! # Metadata Module
//!
//! Works out which year a photo belongs to.
//!
//! ## Resolution Order
//! 1. EXIF `DateTimeOriginal` (tag 0x9003), the moment the shutter fired
//! 2. The file's last-modified time, in local time
//!
//! Reading EXIF never fails the caller. Files without metadata support,
//! truncated headers and malformed dates all fall through to step 2. Only a
//! file with no usable date and no modification time has no year.
//!
//! ## Supported Containers
//! Whatever `kamadak-exif` can open: JPEG, TIFF, PNG, WebP and HEIF/HEIC.
//! BMP and GIF carry no EXIF and are always dated by modification time.

use crate::core::scanner::ImageFile;
use chrono::{DateTime, Datelike, Local};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::SystemTime;

/// The year a photo is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationYear(i32);

impl ClassificationYear {
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ClassificationYear {
    /// Always four digits, so folder names sort correctly
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Where a resolved year came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSource {
    /// EXIF DateTimeOriginal
    Exif,
    /// Filesystem modification time
    FileModified,
}

/// Resolves classification years for image files
pub struct YearResolver;

impl YearResolver {
    /// Year for `file`, or `None` when it has neither a capture date nor
    /// a readable modification time
    pub fn resolve_year(file: &ImageFile) -> Option<ClassificationYear> {
        Self::resolve(file).map(|(year, _)| year)
    }

    /// Year for `file` together with where it came from
    pub fn resolve(file: &ImageFile) -> Option<(ClassificationYear, YearSource)> {
        match Self::read_embedded_year(&file.path) {
            Some(year) => Some((year, YearSource::Exif)),
            None => file
                .modified
                .map(|modified| (Self::filesystem_year(modified), YearSource::FileModified)),
        }
    }

    /// Year from the EXIF capture date, if the file has a usable one
    pub fn read_embedded_year(path: &Path) -> Option<ClassificationYear> {
        let file = File::open(path).ok()?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new().read_from_container(&mut reader).ok()?;

        let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
        match field.value {
            Value::Ascii(ref values) => {
                let raw = std::str::from_utf8(values.first()?).ok()?;
                Self::parse_exif_year(raw)
            }
            _ => None,
        }
    }

    /// Year of a filesystem timestamp in the local time zone
    pub fn filesystem_year(modified: SystemTime) -> ClassificationYear {
        let local: DateTime<Local> = modified.into();
        ClassificationYear(local.year())
    }

    /// Parse the year out of `YYYY:MM:DD HH:MM:SS`, tolerating NUL padding
    fn parse_exif_year(raw: &str) -> Option<ClassificationYear> {
        let year = raw
            .trim_matches(|c: char| c == '\0' || c.is_whitespace())
            .split(':')
            .next()?;

        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        year.parse().ok().map(ClassificationYear)
    }
}
