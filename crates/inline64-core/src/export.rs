//! Pure formatting for the per-record export actions.
//!
//! These functions build the clipboard text and download payloads. The
//! clipboard write goes through the [`Clipboard`] trait; the browser
//! crate implements it and performs file saves itself.

use std::fmt;

use crate::notify::{Notification, Notifier};
use crate::types::ConvertedFile;

/// MIME type of the downloaded text file.
pub const TEXT_MIME: &str = "text/plain";

/// One of the export actions offered for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportAction {
    /// Copy a Markdown image tag.
    Markdown,
    /// Copy the bare data URL.
    Raw,
    /// Save the data URL as a `.txt` file.
    Text,
}

impl ExportAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Raw => "Copy",
            Self::Text => ".TXT",
        }
    }

    /// Confirmation shown after a successful clipboard write.
    ///
    /// Downloads hand off to the browser's own save flow and have no
    /// confirmation.
    #[must_use]
    pub const fn confirmation(self) -> Option<&'static str> {
        match self {
            Self::Markdown => Some("Markdown Copied"),
            Self::Raw => Some("Raw Base64 Copied"),
            Self::Text => None,
        }
    }

    /// The text this action copies or saves for `file`.
    #[must_use]
    pub fn payload(self, file: &ConvertedFile) -> String {
        match self {
            Self::Markdown => markdown(file),
            Self::Raw | Self::Text => file.base64().to_owned(),
        }
    }
}

/// `![<name>](<data-url>)`
#[must_use]
pub fn markdown(file: &ConvertedFile) -> String {
    format!("![{}]({})", file.name(), file.base64())
}

/// Download file name: the original name with `.txt` appended.
#[must_use]
pub fn text_file_name(file: &ConvertedFile) -> String {
    format!("{}.txt", file.name())
}

/// Platform clipboard.
#[allow(async_fn_in_trait)] // WASM is single-threaded; Send bounds are not needed
pub trait Clipboard {
    /// Why a write was refused.
    type Error: fmt::Display;

    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns the platform's error if the write is refused.
    async fn write_text(&self, text: &str) -> Result<(), Self::Error>;
}

/// Copy the payload of `action` for `file`, then confirm it.
///
/// The confirmation is sent only once the clipboard write has resolved.
/// A refused write sends nothing; the error is returned for logging.
/// [`ExportAction::Text`] has no confirmation and is normally saved as a
/// download instead.
///
/// # Errors
///
/// Returns the clipboard's error if the write is refused.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn copy<C, N>(
    action: ExportAction,
    file: &ConvertedFile,
    clipboard: &C,
    notifier: &N,
) -> Result<(), C::Error>
where
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    clipboard.write_text(&action.payload(file)).await?;
    tracing::debug!(name = %file.name(), ?action, "copied");
    if let Some(message) = action.confirmation() {
        notifier.notify(Notification::success(message));
    }
    Ok(())
}
