//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// 2015-07-01 12:00:00 UTC
pub const MID_2015: u64 = 1_435_752_000;
/// 2020-07-01 12:00:00 UTC
pub const MID_2020: u64 = 1_593_604_800;
/// 2021-07-01 12:00:00 UTC
pub const MID_2021: u64 = 1_625_140_800;

/// Mid-year timestamps land in the same year in every time zone
pub fn at(unix_secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(unix_secs)
}

pub fn set_mtime(path: &Path, unix_secs: u64) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(at(unix_secs))
        .unwrap();
}

/// Minimal JPEG whose APP1 Exif segment holds DateTimeOriginal = `date`
///
/// `tag` is appended after the EXIF block so callers can make otherwise
/// equal photos differ by content.
pub fn jpeg_taken_on(date: &str, tag: &[u8]) -> Vec<u8> {
    let mut value = date.as_bytes().to_vec();
    value.push(0);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    // IFD0 -> Exif IFD at 26
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    // Exif IFD: DateTimeOriginal, payload at 44
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(&value);

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg.extend_from_slice(tag);
    jpeg
}
