//! Drop zone with drag-and-drop and a multi-file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use inline64_core::{ConverterConfig, Selection};
use wasm_bindgen::JsCast;

use crate::source::BrowserFile;

/// DOM id of the hidden file input.
const PICKER_ID: &str = "inline64-picker";

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Allow-list and limits used by the type filter.
    config: ConverterConfig,
    /// Refuse all input (the queue is full).
    disabled: bool,
    /// Called once per drop or pick with the filtered batch.
    on_select: EventHandler<Selection<BrowserFile>>,
}

/// A clickable, droppable area accepting the configured image types.
///
/// Every batch is run through [`Selection::partition`] before being
/// handed to `on_select`, so rejected types never reach intake. While
/// `disabled`, drops and clicks are ignored.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let disabled = props.disabled;

    let handle_files = {
        let config = props.config.clone();
        let on_select = props.on_select;
        move |evt: FormEvent| {
            forward(evt.files(), disabled, &config, on_select);
            // Picking the same file twice in a row only fires `change`
            // if the previous value was cleared.
            if let Err(e) = reset_picker() {
                tracing::warn!(error = ?e, "could not reset file input");
            }
        }
    };

    let handle_drop = {
        let config = props.config.clone();
        let on_select = props.on_select;
        move |evt: DragEvent| {
            evt.prevent_default();
            dragging.set(false);
            forward(evt.files(), disabled, &config, on_select);
        }
    };

    let state_class = if disabled {
        "drop-zone--disabled"
    } else if dragging() {
        "drop-zone--active"
    } else {
        ""
    };
    let prompt = if dragging() && !disabled {
        "Drop to convert"
    } else {
        "Click to upload or drag and drop"
    };
    let hint = props.config.format_hint();
    let accept = props.config.accept_attribute();

    rsx! {
        label {
            class: "drop-zone {state_class}",
            aria_disabled: "{disabled}",
            ondragover: move |evt| {
                evt.prevent_default();
                if !disabled {
                    dragging.set(true);
                }
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                id: PICKER_ID,
                r#type: "file",
                accept: "{accept}",
                multiple: true,
                disabled: disabled,
                class: "hidden",
                onchange: handle_files,
            }

            div { class: "drop-zone__icon",
                Icon { width: 28, height: 28, icon: LdUpload }
            }
            p { class: "drop-zone__prompt", "{prompt}" }
            p { class: "drop-zone__hint", "{hint}" }
        }
    }
}

/// Filter a raw batch and forward it, unless input is refused.
fn forward(
    files: Vec<FileData>,
    disabled: bool,
    config: &ConverterConfig,
    on_select: EventHandler<Selection<BrowserFile>>,
) {
    if disabled {
        tracing::debug!(count = files.len(), "drop zone disabled, ignoring files");
        return;
    }
    let selection = Selection::partition(files.into_iter().map(BrowserFile::new), config);
    if !selection.is_empty() {
        on_select.call(selection);
    }
}

/// Clear the file input's value so the next pick always fires `change`.
fn reset_picker() -> Result<(), wasm_bindgen::JsValue> {
    let input = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(PICKER_ID))
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("file input not mounted"))?
        .dyn_into::<web_sys::HtmlInputElement>()?;
    input.set_value("");
    Ok(())
}
