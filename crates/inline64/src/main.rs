use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdTerminal;
use inline64_core::{ConverterConfig, FileId, Queue, Selection, Slots, process_batch};
use inline64_io::{BrowserFile, DropZone, QueueList, ToastStack, use_toasts};

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        web_sys::console::warn_1(&format!("logger init failed: {err}").into());
    }
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the queue, the slot reservations of batches still encoding, and
/// the toast list, and wires them to the drop zone and queue list.
fn app() -> Element {
    // --- Application state ---
    let config = use_hook(ConverterConfig::default);
    let mut queue = use_signal(Queue::new);
    let mut slots = use_signal(Slots::new);
    let toasts = use_toasts(config.toast_duration_ms);

    let max_files = config.max_files;
    let full = slots.read().is_full(queue.read().len(), max_files);

    // --- Intake handler ---
    // Slots for an accepted batch are reserved before encoding starts so
    // an overlapping drop sees them as taken.
    let on_select = {
        let config = config.clone();
        move |selection: Selection<BrowserFile>| {
            let config = config.clone();
            let queued = queue.peek().len();
            let reservation = slots
                .write()
                .reserve(queued, selection.accepted.len(), config.max_files);

            spawn(async move {
                let outcome =
                    process_batch(selection, reservation.occupied(), &config, &toasts).await;
                slots.write().release(reservation);
                match outcome {
                    Ok(records) if !records.is_empty() => queue.write().append(records),
                    Ok(_) => {}
                    Err(err) => tracing::info!(%err, "batch not added"),
                }
            });
        }
    };

    // --- Queue handlers ---
    let on_remove = move |id: FileId| {
        if queue.write().remove(id).is_none() {
            tracing::debug!(%id, "remove ignored, record already gone");
        }
    };

    let on_clear = move |()| {
        queue.write().clear();
    };

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/main.css") }

        div { class: "app",
            header { class: "navbar",
                div { class: "navbar__inner",
                    div { class: "brand",
                        div { class: "brand__mark",
                            Icon { width: 16, height: 16, icon: LdTerminal }
                        }
                        span { class: "brand__name",
                            "Base64"
                            span { class: "brand__muted", "Converter" }
                        }
                    }
                    span { class: "navbar__tag", "Client-side only" }
                }
            }

            main { class: "content",
                section { class: "hero",
                    h1 { class: "hero__title", "Upload Images" }
                    p { class: "hero__subtitle",
                        "Convert up to {max_files} images directly in your browser. Security intact."
                    }

                    DropZone {
                        config: config.clone(),
                        disabled: full,
                        on_select: on_select,
                    }
                }

                QueueList {
                    queue: queue,
                    toasts: toasts,
                    on_remove: on_remove,
                    on_clear: on_clear,
                }
            }

            ToastStack { toasts: toasts }
        }
    }
}
