//! # Pipeline Module
//!
//! Orchestrates a full organize run.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Discover every image under the source folder
//! 2. **Classify** - Resolve each photo's year and content fingerprint
//! 3. **Copy** - Decide unique vs duplicate and copy into the destination
//! 4. **Log** - Write `log_organizacion.txt`
//!
//! ## Parallelism
//! With `parallel(true)`, stage 2 runs on the rayon pool. Stage 3 always
//! walks photos in traversal order, so which copy of a duplicated photo
//! counts as the original never depends on thread scheduling.

mod executor;

pub use executor::{log_path, Organizer, OrganizerBuilder, OrganizerConfig};
