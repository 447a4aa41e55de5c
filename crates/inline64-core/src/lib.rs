//! inline64-core: Pure image-to-data-URL logic (sans-IO).
//!
//! Covers everything between "the user dropped some files" and "here is
//! the text to copy":
//! type filtering -> slot reservation -> capacity check -> concurrent
//! encoding -> queue -> export formatting.
//!
//! This crate has **no browser dependencies**. Files are read through the
//! [`SourceFile`] trait and copied text goes through [`Clipboard`].
//! Outcomes are reported through [`Notifier`]. The browser
//! implementations live in `inline64-io`.

pub mod encode;
pub mod export;
pub mod format;
pub mod intake;
pub mod notify;
pub mod queue;
pub mod selection;
pub mod slots;
pub mod types;

pub use encode::{DataUrl, DataUrlError};
pub use export::{Clipboard, ExportAction};
pub use intake::{IntakeError, process_batch};
pub use notify::{Notification, NotificationKind, Notifier};
pub use queue::Queue;
pub use selection::{Candidate, ReadError, RejectReason, Rejection, Selection, SourceFile};
pub use slots::{Reservation, Slots};
pub use types::{ConvertedFile, ConverterConfig, FileId, MimeType};
