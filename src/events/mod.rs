//! # Events Module
//!
//! Event-driven architecture for GUI-ready progress reporting.
//!
//! ## Design
//! The organizer emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::Scan(ScanEvent::Progress(p)) => println!("Found {} photos", p.photos_found),
//!             Event::Organize(OrganizeEvent::Progress(p)) => println!("Copied {}/{}", p.completed, p.total),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the organizer with the sender
//! organizer.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{EventChannel, EventReceiver, EventSender, null_sender};
pub use types::*;
