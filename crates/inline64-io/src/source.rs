//! Adapter from Dioxus file handles to the core's [`SourceFile`] trait.

use dioxus::html::FileData;
use inline64_core::{ReadError, SourceFile};

/// A file picked or dropped in the browser.
pub struct BrowserFile(FileData);

impl BrowserFile {
    /// Wrap a Dioxus file handle.
    #[must_use]
    pub const fn new(file: FileData) -> Self {
        Self(file)
    }
}

impl SourceFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn content_type(&self) -> Option<String> {
        self.0.content_type()
    }

    #[allow(clippy::future_not_send)] // WASM is single-threaded; FileData is !Send
    async fn read_bytes(&self) -> Result<Vec<u8>, ReadError> {
        self.0
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ReadError {
                name: self.0.name(),
                reason: e.to_string(),
            })
    }
}
