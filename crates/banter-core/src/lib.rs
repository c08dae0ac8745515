//! Core domain components for the Banter messaging client.
//!
//! Pure, synchronous building blocks with no I/O: the client layer feeds
//! events in and interprets the returned outcomes. Each component owns one
//! concern of the synchronization engine:
//!
//! - [`MessageStore`]: ordered, deduplicated message history
//! - [`Paginator`]: backward pagination cursor
//! - [`TypingTracker`]: who is typing right now
//! - [`ConversationState`]: open-conversation metadata and send permission
//! - [`Attachment`]: client-side upload validation

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod conversation;
mod error;
mod pagination;
mod store;
mod typing;
mod upload;

pub use conversation::{ConversationState, ConversationUpdate};
pub use error::{SendError, UploadError};
pub use pagination::{LoadState, Paginator};
pub use store::{Appended, MessageStore};
pub use typing::TypingTracker;
pub use upload::{
    ALLOWED_FILE_TYPES, ALLOWED_IMAGE_TYPES, Attachment, AttachmentKind, MAX_UPLOAD_BYTES,
};
