//! Text file downloads via Blob URLs.
//!
//! Dioxus has no built-in file download API. A download is triggered by
//! wrapping the text in a `Blob`, creating an object URL for it, and
//! clicking a temporary `<a download>` element.
//!
//! Requires a browser environment (`wasm32-unknown-unknown` target).

use inline64_core::ConvertedFile;
use inline64_core::export::{TEXT_MIME, text_file_name};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when triggering a download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Save a record's data URL as `<name>.txt`.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails.
pub fn save_data_url(file: &ConvertedFile) -> Result<(), DownloadError> {
    save_text(file.base64(), &text_file_name(file))
}

/// Offer `contents` to the user as a plain-text file named `filename`.
///
/// The object URL is revoked right after the click; the browser keeps
/// the Blob alive until the download has started.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if `Blob` creation,
/// `URL.createObjectURL`, or element creation fails.
pub fn save_text(contents: &str, filename: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;
    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let opts = BlobPropertyBag::new();
    opts.set_type(TEXT_MIME);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor)?;
    anchor.click();

    // The download has already started; cleanup failures are not errors.
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);

    tracing::debug!(%filename, len = contents.len(), "download triggered");
    Ok(())
}
