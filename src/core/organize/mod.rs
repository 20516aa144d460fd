//! Photo organization module.
//!
//! Files each photo under `Photos/<year>` or `PossibleDuplicates/<year>`
//! and keeps the mapping log.

mod classifier;
mod executor;
mod journal;
mod types;

pub use classifier::{Analysis, Classifier};
pub use executor::OrganizeExecutor;
pub use journal::OrganizeJournal;
pub use types::*;
