//! Validation errors for the core components.
//!
//! Everything here is rejected before any request is issued and carries
//! user-facing text; nothing propagates above the client boundary.

use thiserror::Error;

use crate::upload::AttachmentKind;

/// Why a message could not be sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// Compose content was empty after trimming.
    #[error("cannot send an empty message")]
    Empty,

    /// No conversation is open.
    #[error("no conversation is open")]
    NoConversation,

    /// The actor is not a member of the conversation.
    #[error("you are not a member of this conversation")]
    NotMember,

    /// Strict mode restricts posting to the owner.
    #[error("strict mode is enabled; only the owner can send messages")]
    NotPermitted,
}

/// Why an attachment was rejected before upload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The declared MIME type is outside the allow-list for its kind.
    #[error("unsupported {kind} type: {mime_type}")]
    UnsupportedType {
        /// Which allow-list was consulted.
        kind: AttachmentKind,
        /// The rejected MIME type.
        mime_type: String,
    },

    /// The payload exceeds the size cap.
    #[error("attachment is too large: {size_bytes} bytes (limit {limit_bytes})")]
    TooLarge {
        /// Actual payload size.
        size_bytes: usize,
        /// The configured cap.
        limit_bytes: usize,
    },
}
