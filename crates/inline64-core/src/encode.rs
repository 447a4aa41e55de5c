//! Base64 data URL encoding and decoding.
//!
//! Produces `data:<mime>;base64,<payload>` strings using the standard
//! Base64 alphabet with padding, the same form a browser's
//! `FileReader.readAsDataURL` yields, so the result can be used directly
//! as an `<img src>`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::types::MimeType;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Errors that can occur when parsing a data URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUrlError {
    /// The string does not start with `data:`.
    #[error("not a data URL")]
    MissingScheme,

    /// There is no `,` between the header and the payload.
    #[error("data URL has no payload separator")]
    MissingSeparator,

    /// The header does not declare a Base64 payload.
    #[error("data URL payload is not Base64-encoded")]
    NotBase64,

    /// The payload contains invalid Base64.
    #[error("invalid Base64 payload: {0}")]
    Payload(String),
}

impl From<base64::DecodeError> for DataUrlError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Encode `bytes` as a Base64 data URL of the given type.
#[must_use]
pub fn data_url(mime: MimeType, bytes: &[u8]) -> String {
    let payload = STANDARD.encode(bytes);
    format!("{SCHEME}{mime}{BASE64_MARKER},{payload}")
}

/// A borrowed, parsed Base64 data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataUrl<'a> {
    media_type: &'a str,
    payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a `data:<mime>;base64,<payload>` string into its parts.
    ///
    /// The payload is not validated until [`Self::decode`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`DataUrlError::MissingScheme`], [`DataUrlError::MissingSeparator`]
    /// or [`DataUrlError::NotBase64`] when the header is malformed.
    pub fn parse(input: &'a str) -> Result<Self, DataUrlError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or(DataUrlError::MissingScheme)?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or(DataUrlError::MissingSeparator)?;
        let media_type = header
            .strip_suffix(BASE64_MARKER)
            .ok_or(DataUrlError::NotBase64)?;
        Ok(Self {
            media_type,
            payload,
        })
    }

    /// The declared media type, e.g. `image/png`.
    #[must_use]
    pub const fn media_type(&self) -> &'a str {
        self.media_type
    }

    /// Decode the payload back into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DataUrlError::Payload`] if the payload is not valid
    /// standard Base64.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        Ok(STANDARD.decode(self.payload)?)
    }
}
