//! Shared types for inline64: the converted-file record, the MIME
//! allow-list, and converter configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::encode::{DataUrl, DataUrlError};

/// Process-unique identifier of a queued record.
///
/// Generated when the record is created and never reused within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An image type the converter is able to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    /// `image/jpeg`
    #[serde(rename = "image/jpeg")]
    Jpeg,
    /// `image/png`
    #[serde(rename = "image/png")]
    Png,
    /// `image/webp`
    #[serde(rename = "image/webp")]
    Webp,
}

impl MimeType {
    /// Every supported type, in display order.
    pub const ALL: [Self; 3] = [Self::Jpeg, Self::Png, Self::Webp];

    /// Canonical MIME string, e.g. `image/png`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// The part after `image/`, shown next to the file size.
    #[must_use]
    pub const fn subtype(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// Short uppercase label for the drop zone hint.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Jpeg => "JPG",
            Self::Png => "PNG",
            Self::Webp => "WEBP",
        }
    }

    /// File extensions that map to this type (lowercase, no dot).
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Webp => &["webp"],
        }
    }

    /// Parse a browser-reported content type.
    ///
    /// Matching ignores ASCII case and any parameters after `;`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(essence))
    }

    /// Infer the type from a file name's extension.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::ALL.into_iter().find(|t| {
            t.extensions()
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(ext))
        })
    }

    /// Resolve the type of an incoming file.
    ///
    /// The browser-reported content type wins when it is present and
    /// non-empty; the extension is only consulted when the browser
    /// reported nothing. A reported type outside the supported set is
    /// never overridden by a matching extension.
    #[must_use]
    pub fn resolve(reported: Option<&str>, name: &str) -> Option<Self> {
        match reported.map(str::trim) {
            Some(mime) if !mime.is_empty() => Self::from_mime(mime),
            _ => Self::from_file_name(name),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successfully converted file.
///
/// Records are immutable: they are built once encoding has fully
/// succeeded and are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    id: FileId,
    name: String,
    mime: MimeType,
    size: u64,
    base64: String,
}

impl ConvertedFile {
    /// Build a record from a file's name, type, and raw bytes.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, mime: MimeType, bytes: &[u8]) -> Self {
        Self {
            id: FileId::new(),
            name: name.into(),
            mime,
            size: bytes.len() as u64,
            base64: crate::encode::data_url(mime, bytes),
        }
    }

    /// Stable identifier of this record.
    #[must_use]
    pub const fn id(&self) -> FileId {
        self.id
    }

    /// Original file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of the original file.
    #[must_use]
    pub const fn mime(&self) -> MimeType {
        self.mime
    }

    /// Byte length of the original file.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// The full `data:<mime>;base64,<payload>` string.
    #[must_use]
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// Decode the stored data URL back into the original bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`DataUrlError`] if the stored string is not a valid
    /// Base64 data URL. Records built by [`Self::from_bytes`] always
    /// decode successfully.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, DataUrlError> {
        DataUrl::parse(&self.base64)?.decode()
    }
}

/// Converter configuration.
///
/// The defaults match the behavior of the hosted page: ten files, the
/// three common web image formats, and four-second toasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Maximum number of records the queue may hold.
    pub max_files: usize,

    /// Types accepted by the drop zone. Everything else is rejected
    /// before reaching intake.
    pub accepted_types: Vec<MimeType>,

    /// How long a notification stays on screen, in milliseconds.
    pub toast_duration_ms: u32,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_files: 10,
            accepted_types: MimeType::ALL.to_vec(),
            toast_duration_ms: 4000,
        }
    }
}

impl ConverterConfig {
    /// Whether `mime` is on the allow-list.
    #[must_use]
    pub fn accepts(&self, mime: MimeType) -> bool {
        self.accepted_types.contains(&mime)
    }

    /// Value for the file input's `accept` attribute.
    #[must_use]
    pub fn accept_attribute(&self) -> String {
        self.accepted_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Hint shown under the drop zone, e.g. `JPG • PNG • WEBP (MAX 10)`.
    #[must_use]
    pub fn format_hint(&self) -> String {
        let labels = self
            .accepted_types
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" • ");
        format!("{labels} (MAX {})", self.max_files)
    }
}
