//! Change notifications for quiz control viewers
//!
//! After every committed transition the advancer publishes a
//! [`ControlUpdate`]. Viewers treat it as a hint: they re-read the control
//! row rather than trusting the payload, so a dropped or late update only
//! delays a refresh.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::{constants, ids::EventId, model::QuizControl, screen::Screen};

/// Announces that the control row of an event changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlUpdate {
    /// Event whose control row changed
    pub event_id: EventId,
    /// Screen after the change
    pub screen: Screen,
    /// Version after the change
    pub version: u64,
}

impl From<&QuizControl> for ControlUpdate {
    fn from(control: &QuizControl) -> Self {
        Self {
            event_id: control.event_id,
            screen: control.current_screen,
            version: control.version,
        }
    }
}

impl ControlUpdate {
    /// Converts the update to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Trait for delivering control updates to viewers
pub trait Notifier: Send + Sync {
    /// Publishes an update; delivery is best effort
    fn publish(&self, update: &ControlUpdate);
}

/// A notifier that drops every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _update: &ControlUpdate) {}
}

/// A notifier fanning updates out over a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<ControlUpdate>,
}

impl BroadcastNotifier {
    /// Creates a notifier buffering `CHANNEL_CAPACITY` updates per subscriber
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(constants::notify::CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to all future updates
    pub fn subscribe(&self) -> broadcast::Receiver<ControlUpdate> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, update: &ControlUpdate) {
        // An error only means nobody is subscribed right now.
        if self.sender.send(update.clone()).is_err() {
            tracing::trace!(event_id = %update.event_id, "no subscribers for control update");
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_update_from_control() {
        let mut control = QuizControl::new(EventId::new());
        control.current_screen = Screen::Question;
        control.version = 4;

        let update = ControlUpdate::from(&control);
        assert_eq!(update.event_id, control.event_id);
        assert_eq!(update.screen, Screen::Question);
        assert_eq!(update.version, 4);
    }

    #[test]
    fn test_update_to_message() {
        let update = ControlUpdate {
            event_id: EventId::new(),
            screen: Screen::AnswerCheck,
            version: 2,
        };
        let json = update.to_message();

        assert!(json.contains("\"screen\":\"answer_check\""));
        assert!(json.contains("\"version\":2"));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_subscribers() {
        let notifier = BroadcastNotifier::new();
        let mut first = notifier.subscribe();
        let mut second = notifier.subscribe();

        let update = ControlUpdate {
            event_id: EventId::new(),
            screen: Screen::Break,
            version: 7,
        };
        notifier.publish(&update);

        assert_eq!(first.recv().await.unwrap(), update);
        assert_eq!(second.recv().await.unwrap(), update);
    }

    #[test]
    fn test_broadcast_without_subscribers() {
        let notifier = BroadcastNotifier::new();
        notifier.publish(&ControlUpdate {
            event_id: EventId::new(),
            screen: Screen::Waiting,
            version: 0,
        });
    }
}
