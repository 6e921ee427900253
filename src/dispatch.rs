use crate::events::{LineId, OutboundMessage, ShabadId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Outbound channel closed")]
    Closed,
}

/// The local viewer surface that displays a line or free text.
pub trait ViewerSink {
    fn show_line(&mut self, shabad_id: &ShabadId, line_id: &LineId);
    fn show_text(&mut self, text: &str);
}

/// One-way channel to the host process.
pub trait Notifier {
    fn notify(&self, message: OutboundMessage) -> Result<(), NotifyError>;
}

impl Notifier for async_channel::Sender<OutboundMessage> {
    fn notify(&self, message: OutboundMessage) -> Result<(), NotifyError> {
        self.try_send(message).map_err(|_| NotifyError::Closed)
    }
}

/// Forwards display requests to the local viewer and to the host process.
pub struct Dispatcher<N> {
    notifier: N,
}

impl<N: Notifier> Dispatcher<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn send_line(&self, viewer: &mut impl ViewerSink, shabad_id: ShabadId, line_id: LineId) {
        viewer.show_line(&shabad_id, &line_id);
        self.post(OutboundMessage::ShowLine { shabad_id, line_id });
    }

    pub fn send_text(&self, viewer: &mut impl ViewerSink, text: impl Into<String>) {
        let text = text.into();
        viewer.show_text(&text);
        self.post(OutboundMessage::ShowText { text });
    }

    /// Fire-and-forget: a lost notification is logged and dropped.
    pub fn post(&self, message: OutboundMessage) {
        if let Err(e) = self.notifier.notify(message) {
            log::warn!("Dropping outbound notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingViewer {
        shown: Vec<String>,
    }

    impl ViewerSink for RecordingViewer {
        fn show_line(&mut self, shabad_id: &ShabadId, line_id: &LineId) {
            self.shown.push(format!("line {shabad_id}/{line_id}"));
        }

        fn show_text(&mut self, text: &str) {
            self.shown.push(format!("text {text}"));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: RefCell<Vec<OutboundMessage>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: OutboundMessage) -> Result<(), NotifyError> {
            self.sent.borrow_mut().push(message);
            Ok(())
        }
    }

    #[test]
    fn test_send_text_updates_viewer_and_notifies_once() {
        let dispatcher = Dispatcher::new(RecordingNotifier::default());
        let mut viewer = RecordingViewer::default();

        dispatcher.send_text(&mut viewer, "Waheguru");

        assert_eq!(viewer.shown, vec!["text Waheguru".to_string()]);
        assert_eq!(
            *dispatcher.notifier().sent.borrow(),
            vec![OutboundMessage::ShowText {
                text: "Waheguru".to_string()
            }]
        );
    }

    #[test]
    fn test_send_line_updates_viewer_and_notifies_once() {
        let dispatcher = Dispatcher::new(RecordingNotifier::default());
        let mut viewer = RecordingViewer::default();

        dispatcher.send_line(&mut viewer, ShabadId::new("3"), LineId::new("17"));

        assert_eq!(viewer.shown, vec!["line 3/17".to_string()]);
        assert_eq!(
            *dispatcher.notifier().sent.borrow(),
            vec![OutboundMessage::ShowLine {
                shabad_id: ShabadId::new("3"),
                line_id: LineId::new("17"),
            }]
        );
    }

    #[test]
    fn test_closed_channel_still_updates_viewer() {
        let (tx, rx) = async_channel::unbounded::<OutboundMessage>();
        drop(rx);
        let dispatcher = Dispatcher::new(tx);
        let mut viewer = RecordingViewer::default();

        dispatcher.send_text(&mut viewer, "Waheguru");
        assert_eq!(viewer.shown.len(), 1);
    }

    #[test]
    fn test_channel_notifier_delivers() {
        let (tx, rx) = async_channel::unbounded::<OutboundMessage>();
        let dispatcher = Dispatcher::new(tx);
        let mut viewer = RecordingViewer::default();

        dispatcher.send_text(&mut viewer, "Waheguru");
        assert_eq!(
            rx.try_recv().unwrap(),
            OutboundMessage::ShowText {
                text: "Waheguru".to_string()
            }
        );
        assert!(rx.try_recv().is_err());
    }
}
