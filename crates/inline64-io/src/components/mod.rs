//! Dioxus UI components for inline64.
//!
//! Provides the drop zone, the conversion queue with its per-file
//! actions, and the toast stack.

mod drop_zone;
mod queue_list;
mod toast_stack;

pub use drop_zone::DropZone;
pub use queue_list::QueueList;
pub use toast_stack::ToastStack;
