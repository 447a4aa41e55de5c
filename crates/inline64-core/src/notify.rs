//! User-facing notifications.
//!
//! Intake and export report outcomes through an injected [`Notifier`]
//! instead of talking to the UI directly. The browser crate renders them
//! as toasts; tests collect them with [`Recorder`].

use std::cell::RefCell;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Something finished as requested.
    Success,
    /// Part of a request was ignored; the rest went ahead.
    Warning,
    /// The request was refused or failed.
    Error,
}

impl NotificationKind {
    /// Lowercase name, usable as a CSS modifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
}

impl Notification {
    /// A success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// A warning message.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    /// An error message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget sink for notifications.
pub trait Notifier {
    /// Deliver one notification.
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// A [`Notifier`] that keeps everything it receives, in order.
#[derive(Debug, Default)]
pub struct Recorder {
    received: RefCell<Vec<Notification>>,
}

impl Recorder {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything received so far.
    #[must_use]
    pub fn take(&self) -> Vec<Notification> {
        self.received.take()
    }
}

impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        self.received.borrow_mut().push(notification);
    }
}
