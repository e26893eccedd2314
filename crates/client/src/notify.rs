//! Transient user-facing notifications (toasts).
//!
//! The state layers never touch a rendering surface directly; they emit
//! [`Toast`] values through the [`Notify`] trait and the front end decides how
//! to show them. The CLI logs them via `tracing`; tests collect them.

use std::sync::Mutex;
use std::time::Duration;

/// How long a cart-add confirmation stays on screen.
pub const CART_TOAST: Duration = Duration::from_secs(3);

/// Default display duration for everything else.
pub const DEFAULT_TOAST: Duration = Duration::from_millis(5500);

/// A transient on-screen notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Message shown to the user.
    pub message: String,
    /// How long the notification stays visible before auto-dismissing.
    pub duration: Duration,
}

impl Toast {
    /// A toast with the default duration.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: DEFAULT_TOAST,
        }
    }

    /// A toast with an explicit duration.
    #[must_use]
    pub fn with_duration(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
        }
    }
}

/// Sink for user-facing notifications.
pub trait Notify: Send + Sync {
    /// Show a notification.
    fn toast(&self, toast: Toast);
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn toast(&self, toast: Toast) {
        tracing::info!(duration = ?toast.duration, "{}", toast.message);
    }
}

/// Notifier that buffers toasts in memory.
///
/// Used by tests to assert on the exact notifications a flow produced.
#[derive(Debug, Default)]
pub struct BufferNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl BufferNotifier {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts emitted so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.toasts
            .lock()
            .expect("notifier lock poisoned")
            .iter()
            .map(|t| t.message.clone())
            .collect()
    }

    /// Number of toasts emitted so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.lock().expect("notifier lock poisoned").len()
    }

    /// Whether no toast has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notify for BufferNotifier {
    fn toast(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_notifier_collects_in_order() {
        let notifier = BufferNotifier::new();
        notifier.toast(Toast::new("first"));
        notifier.toast(Toast::with_duration("second", CART_TOAST));

        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert_eq!(notifier.len(), 2);
    }

    #[test]
    fn test_toast_durations() {
        assert_eq!(Toast::new("x").duration, DEFAULT_TOAST);
        assert_eq!(Toast::with_duration("x", CART_TOAST).duration, CART_TOAST);
    }
}
