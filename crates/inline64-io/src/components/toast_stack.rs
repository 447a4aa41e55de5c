//! Bottom-right stack of transient notifications.

use dioxus::prelude::*;

use crate::toast::Toasts;

/// Renders the visible toasts. Clicking a toast dismisses it.
#[component]
pub fn ToastStack(toasts: Toasts) -> Element {
    rsx! {
        div { class: "toasts", role: "status", aria_live: "polite",
            for toast in toasts.visible() {
                div {
                    key: "{toast.id}",
                    class: "toast toast--{toast.notification.kind.as_str()}",
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.notification.message}"
                }
            }
        }
    }
}
