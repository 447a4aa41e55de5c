//! Toast notifications backed by Dioxus signals.
//!
//! [`Toasts`] implements the core [`Notifier`] so intake and export can
//! report to the UI without knowing about it. Each toast removes itself
//! after the configured duration.

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use inline64_core::{Notification, Notifier};

/// Number of toasts shown at once; older ones stay queued behind them.
pub const MAX_VISIBLE: usize = 3;

/// One toast on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Key for rendering and dismissal.
    pub id: u64,
    /// What to show.
    pub notification: Notification,
}

/// Handle to the toast list. Cheap to copy into event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    entries: Signal<Vec<Toast>>,
    next_id: Signal<u64>,
    duration_ms: u32,
}

/// Create the toast list for the current component.
pub fn use_toasts(duration_ms: u32) -> Toasts {
    let entries = use_signal(Vec::new);
    let next_id = use_signal(|| 0_u64);
    Toasts {
        entries,
        next_id,
        duration_ms,
    }
}

impl Toasts {
    /// The newest toasts, oldest first, at most [`MAX_VISIBLE`].
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        newest(&self.entries.read(), MAX_VISIBLE).to_vec()
    }

    /// Remove a toast before its timer runs out.
    pub fn dismiss(&self, id: u64) {
        let mut entries = self.entries;
        entries.write().retain(|t| t.id != id);
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        tracing::debug!(kind = notification.kind.as_str(), message = %notification.message, "toast");

        let mut next_id = self.next_id;
        let id = *next_id.peek();
        next_id.set(id.wrapping_add(1));

        let mut entries = self.entries;
        entries.write().push(Toast { id, notification });

        let this = *self;
        spawn(async move {
            TimeoutFuture::new(this.duration_ms).await;
            this.dismiss(id);
        });
    }
}

/// The last `max` entries of `entries`.
fn newest(entries: &[Toast], max: usize) -> &[Toast] {
    &entries[entries.len().saturating_sub(max)..]
}
