//! # photo-organize CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! photo-organize                      # prompts for both folders
//! photo-organize ~/Pictures ~/Organized
//! photo-organize ~/Pictures ~/Organized --parallel --output json
//! ```

mod cli;

use photo_organizer::Result;

fn main() -> Result<()> {
    photo_organizer::init_tracing();
    cli::run()
}
