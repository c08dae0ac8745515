//! Client error type.

use banter_core::{SendError, UploadError};
use thiserror::Error;

/// Errors surfaced by [`Client::handle`].
///
/// Every variant is a local validation or state error, surfaced to the
/// user as a transient notice. Network failures never reach this type:
/// failed fetches come back as [`ApiResponse::Failed`] and are swallowed.
///
/// [`Client::handle`]: crate::Client::handle
/// [`ApiResponse::Failed`]: crate::ApiResponse::Failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Message send rejected at the boundary.
    #[error(transparent)]
    Send(#[from] SendError),

    /// Attachment rejected before upload.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The operation needs an open conversation.
    #[error("no conversation is open")]
    NoConversation,

    /// The operation applies only to group conversations.
    #[error("this is not a group conversation")]
    NotGroup,

    /// The operation applies only to direct conversations.
    #[error("this is not a direct conversation")]
    NotDirect,
}
