//! SDK event stream — transient notices and session-expiry signals.
//!
//! The SDK never renders anything itself. User-visible feedback (the toasts a
//! front-end would show) and the forced-logout redirect are published as
//! [`SdkEvent`]s on a broadcast channel; the embedding application subscribes
//! via `SafeDealClient::events()` and reacts however its view layer likes.
//! Emission is fire-and-forget: events are dropped when nobody listens.

use tokio::sync::broadcast;

/// Capacity of the event channel. Slow subscribers lag rather than block.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// An event published by the SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkEvent {
    /// Show a transient notification.
    Notice(Notice),
    /// The session is no longer recoverable — navigate to the login entry
    /// point. Emitted on irrecoverable refresh failure.
    SessionExpired,
}

/// Whether a request's failures are surfaced as notices or propagated
/// silently to the caller (login/register forms render errors inline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticePolicy {
    #[default]
    Surface,
    Silent,
}

/// Shared broadcast hub for [`SdkEvent`]s.
#[derive(Debug, Clone)]
pub(crate) struct EventHub {
    tx: broadcast::Sender<SdkEvent>,
}

impl EventHub {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<SdkEvent> {
        self.tx.subscribe()
    }

    pub(crate) fn emit(&self, event: SdkEvent) {
        // Send only fails when there are no subscribers; that is fine.
        let _ = self.tx.send(event);
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.emit(SdkEvent::Notice(Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }));
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.emit(SdkEvent::Notice(Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_subscribers_is_a_no_op() {
        let hub = EventHub::new();
        hub.error("nobody is listening");
    }

    #[test]
    fn test_subscribers_receive_emitted_events() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();

        hub.success("logged in");
        hub.emit(SdkEvent::SessionExpired);

        assert_eq!(
            rx.try_recv().unwrap(),
            SdkEvent::Notice(Notice {
                level: NoticeLevel::Success,
                message: "logged in".to_string(),
            })
        );
        assert_eq!(rx.try_recv().unwrap(), SdkEvent::SessionExpired);
    }
}
