//! Fire-and-forget notification sinks for import progress.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub timeout_ms: u64,
}

/// Receives advisory notifications. Implementations must not block or fail.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str, timeout: Duration);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, message: &str, _timeout: Duration) {
        tracing::info!("[{}] {}", title, message);
    }
}

/// Forwards notifications over an unbounded channel. A dropped receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, title: &str, message: &str, timeout: Duration) {
        let _ = self.tx.send(Notification {
            title: title.to_string(),
            message: message.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_notifier_forwards() {
        let (notifier, mut rx) = ChannelNotifier::new();
        notifier.notify("Importing decks", "Found 3", Duration::from_millis(1500));

        let notification = rx.try_recv().unwrap();
        assert_eq!(notification.title, "Importing decks");
        assert_eq!(notification.message, "Found 3");
        assert_eq!(notification.timeout_ms, 1500);
    }

    #[test]
    fn test_channel_notifier_survives_closed_receiver() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify("Importing decks", "nobody listening", Duration::ZERO);
    }
}
