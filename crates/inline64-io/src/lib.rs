//! inline64-io: Browser I/O and Dioxus component library.
//!
//! Handles file reading, clipboard writes, Blob downloads, and toast
//! notifications, and provides the UI components for the inline64 web
//! application.

pub mod clipboard;
pub mod components;
pub mod download;
pub mod source;
pub mod toast;

pub use components::{DropZone, QueueList, ToastStack};
pub use source::BrowserFile;
pub use toast::{Toasts, use_toasts};
