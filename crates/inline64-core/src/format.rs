//! Display formatting for queue rows.
//!
//! The MIME subtype shown next to the size comes from
//! [`MimeType::subtype`](crate::MimeType::subtype).

/// Format a byte count as kilobytes with one decimal, e.g. `"1.5 KB"`.
///
/// Uses 1024 bytes per kilobyte. Halfway values round up, so 1280
/// bytes is `"1.3 KB"`.
#[must_use]
pub fn kilobytes(bytes: u64) -> String {
    // Work in tenths of a kilobyte with integer math to avoid float
    // tie-breaking differences.
    let tenths = (u128::from(bytes) * 10 + 512) / 1024;
    format!("{}.{} KB", tenths / 10, tenths % 10)
}
