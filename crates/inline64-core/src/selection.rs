//! Incoming file batches and the MIME type filter.
//!
//! A drop or picker interaction yields a batch of [`SourceFile`]s.
//! [`Selection::partition`] splits it into accepted candidates and
//! rejected entries before anything is read.

use crate::types::{ConverterConfig, MimeType};

/// Failure to read a source file's contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to read {name}: {reason}")]
pub struct ReadError {
    /// Name of the file that could not be read.
    pub name: String,
    /// Platform-provided failure description.
    pub reason: String,
}

/// A file handed over by the drop zone or file picker.
///
/// The browser implementation wraps Dioxus `FileData`; tests use
/// in-memory fakes.
#[allow(async_fn_in_trait)] // WASM is single-threaded; Send bounds are not needed
pub trait SourceFile {
    /// The file name as reported by the platform.
    fn name(&self) -> String;

    /// The content type as reported by the platform, if any.
    fn content_type(&self) -> Option<String>;

    /// Read the file's full contents.
    ///
    /// # Errors
    ///
    /// Returns a [`ReadError`] if the platform read fails.
    async fn read_bytes(&self) -> Result<Vec<u8>, ReadError>;
}

/// A file that passed the type filter.
#[derive(Debug)]
pub struct Candidate<F> {
    /// The underlying source file.
    pub file: F,
    /// Name captured at filter time.
    pub name: String,
    /// Resolved, allow-listed type.
    pub mime: MimeType,
}

/// Why a file was turned away by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The type is unknown or not on the allow-list. Holds whatever the
    /// platform reported (possibly empty).
    UnsupportedType(String),
}

/// A file that did not pass the type filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// File name.
    pub name: String,
    /// Reason for rejection.
    pub reason: RejectReason,
}

/// One batch after type filtering.
#[derive(Debug)]
pub struct Selection<F> {
    /// Files whose type is on the allow-list, in original order.
    pub accepted: Vec<Candidate<F>>,
    /// Files turned away by the filter, in original order.
    pub rejected: Vec<Rejection>,
}

impl<F> Default for Selection<F> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<F: SourceFile> Selection<F> {
    /// Split a raw batch by type, preserving order within each side.
    pub fn partition(files: impl IntoIterator<Item = F>, config: &ConverterConfig) -> Self {
        let mut selection = Self::default();
        for file in files {
            let name = file.name();
            let reported = file.content_type();
            match MimeType::resolve(reported.as_deref(), &name) {
                Some(mime) if config.accepts(mime) => {
                    selection.accepted.push(Candidate { file, name, mime });
                }
                _ => {
                    tracing::warn!(%name, reported = ?reported, "rejected file with unsupported type");
                    selection.rejected.push(Rejection {
                        name,
                        reason: RejectReason::UnsupportedType(reported.unwrap_or_default()),
                    });
                }
            }
        }
        selection
    }
}

impl<F> Selection<F> {
    /// Whether the batch contained nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty() && self.rejected.is_empty()
    }
}
