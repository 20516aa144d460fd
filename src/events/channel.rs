//! Event channel built on crossbeam-channel.
//!
//! The organizer core only ever holds an [`EventSender`]; whoever renders
//! progress (the CLI, a test, a future GUI) holds the [`EventReceiver`].

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Cloneable handle the organizer uses to publish events.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Publish an event.
    ///
    /// A dropped receiver is not an error: progress reporting is optional,
    /// so the event is discarded and the run carries on.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving end held by the UI layer.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event arrives, or `None` once every sender is gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Iterate until every sender has been dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Unbounded channel; events are small and a run emits a few per photo.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender whose receiver is already gone. Every event is dropped.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{OrganizeEvent, OrganizeProgress, PipelineEvent, ScanEvent, ScanProgress};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_can_be_sent_across_threads() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                directories_scanned: 5,
                photos_found: 25,
                current_path: PathBuf::from("/photos/2019"),
            })));
        });

        handle.join().unwrap();

        match receiver.recv().unwrap() {
            Event::Scan(ScanEvent::Progress(p)) => assert_eq!(p.photos_found, 25),
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Pipeline(PipelineEvent::Started));
    }

    #[test]
    fn recv_returns_none_after_senders_drop() {
        let (sender, receiver) = EventChannel::new();
        sender.send(Event::Pipeline(PipelineEvent::Started));
        drop(sender);

        assert!(receiver.recv().is_some());
        assert!(receiver.recv().is_none());
    }

    #[test]
    fn iter_yields_events_in_send_order() {
        let (sender, receiver) = EventChannel::new();

        sender.send(Event::Pipeline(PipelineEvent::Started));
        sender.send(Event::Organize(OrganizeEvent::Progress(OrganizeProgress {
            completed: 1,
            total: 2,
            current_path: PathBuf::from("/photos/a.jpg"),
        })));
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Pipeline(PipelineEvent::Started)));
    }
}
