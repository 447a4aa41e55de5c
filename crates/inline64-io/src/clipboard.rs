//! Clipboard writes via the browser Clipboard API.
//!
//! Requires a browser environment (`wasm32-unknown-unknown` target) and
//! a user-gesture context, i.e. call from a click handler.

use inline64_core::Clipboard;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Errors that can occur when writing to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Copy `text` to the system clipboard.
///
/// Wraps [`navigator.clipboard.writeText()`][mdn]. Data URLs for large
/// images can be several megabytes; the browser copies them as-is.
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if there is no window, or if the
/// write is refused (e.g. the page lacks clipboard-write permission or
/// the document is not focused).
///
/// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Clipboard/writeText
#[allow(clippy::future_not_send)] // WASM is single-threaded; Clipboard is !Send
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await?;
    tracing::debug!(len = text.len(), "copied to clipboard");
    Ok(())
}

/// The system clipboard, as seen by the core's export actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    type Error = ClipboardError;

    #[allow(clippy::future_not_send)] // WASM is single-threaded; Clipboard is !Send
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        write_text(text).await
    }
}
