//! # Photo Organizer
//!
//! Copies a photo collection into a tidy tree without touching the originals.
//!
//! ## Output Layout
//! - `Photos/<year>/` - the first copy of every distinct photo
//! - `PossibleDuplicates/<year>/` - byte-identical copies of an earlier photo
//! - `log_organizacion.txt` - one `source => destination` line per copy
//!
//! The year comes from EXIF `DateTimeOriginal` when present and from the
//! file's modification time otherwise.
//!
//! ## Architecture
//! - `core` - The organizing engine
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{OrganizerError, Result};

/// Initialize tracing for the application
///
/// Filtering follows `RUST_LOG`. Calling this twice, or after another
/// subscriber was installed, leaves the existing subscriber in place.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
