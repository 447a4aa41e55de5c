//! The conversion queue: one row per converted file with its actions.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;
use inline64_core::{ConvertedFile, ExportAction, FileId, Queue, export, format};

use crate::toast::Toasts;
use crate::clipboard::BrowserClipboard;
use crate::download;

/// Props for the [`QueueList`] component.
#[derive(Props, Clone, PartialEq)]
pub struct QueueListProps {
    /// The queue to render. Export actions read records from it.
    queue: Signal<Queue>,
    /// Where copy confirmations go.
    toasts: Toasts,
    /// Called with the id of a record to remove.
    on_remove: EventHandler<FileId>,
    /// Called when "Clear All" is pressed.
    on_clear: EventHandler<()>,
}

/// Queue header with "Clear All", followed by one row per record.
///
/// Renders nothing while the queue is empty.
#[component]
pub fn QueueList(props: QueueListProps) -> Element {
    let queue = props.queue.read();
    if queue.is_empty() {
        return rsx! {};
    }
    let on_clear = props.on_clear;

    rsx! {
        section { class: "queue",
            div { class: "queue__header",
                h2 { class: "queue__title", "Conversion Queue" }
                button {
                    class: "queue__clear",
                    onclick: move |_| on_clear.call(()),
                    "Clear All"
                }
            }

            div { class: "queue__rows",
                for file in queue.iter() {
                    {render_row(file, props.queue, props.toasts, props.on_remove)}
                }
            }
        }
    }
}

/// Render a single queue row.
fn render_row(
    file: &ConvertedFile,
    queue: Signal<Queue>,
    toasts: Toasts,
    on_remove: EventHandler<FileId>,
) -> Element {
    let id = file.id();
    let size = format::kilobytes(file.size());
    let subtype = file.mime().subtype();

    rsx! {
        div { key: "{id}", class: "row",
            div { class: "row__thumb",
                img { src: "{file.base64()}", alt: "preview" }
            }

            div { class: "row__meta",
                p { class: "row__name", title: "{file.name()}", "{file.name()}" }
                p { class: "row__detail", "{size} • {subtype}" }
            }

            div { class: "row__actions",
                for action in [ExportAction::Markdown, ExportAction::Raw, ExportAction::Text] {
                    button {
                        class: "row__button",
                        onclick: move |_| run_export(queue, id, action, toasts),
                        "{action.label()}"
                    }
                }
                button {
                    class: "row__remove",
                    aria_label: "Remove {file.name()}",
                    onclick: move |_| on_remove.call(id),
                    Icon { width: 16, height: 16, icon: LdX }
                }
            }
        }
    }
}

/// Perform an export action for the record `id`.
///
/// Clipboard and download failures are logged and otherwise ignored;
/// the browser surfaces its own errors for both.
fn run_export(queue: Signal<Queue>, id: FileId, action: ExportAction, toasts: Toasts) {
    let Some(file) = queue.peek().get(id).cloned() else {
        return;
    };

    match action {
        ExportAction::Markdown | ExportAction::Raw => {
            spawn(async move {
                if let Err(e) = export::copy(action, &file, &BrowserClipboard, &toasts).await {
                    tracing::warn!(error = %e, ?action, "clipboard write failed");
                }
            });
        }
        ExportAction::Text => {
            if let Err(e) = download::save_data_url(&file) {
                tracing::warn!(error = %e, name = %file.name(), "download failed");
            }
        }
    }
}
