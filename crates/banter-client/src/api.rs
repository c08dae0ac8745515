//! REST data-fetch boundary.
//!
//! The client never performs HTTP itself: it issues [`ApiRequest`]s as
//! actions, the driver executes them against a [`ChatApi`] implementation,
//! and results come back as [`crate::ClientEvent::Api`]. The
//! [`execute_request`] helper performs that translation, including turning
//! failures into [`ApiResponse::Failed`] so they can be logged and
//! swallowed at one place.

use async_trait::async_trait;
use banter_core::Attachment;
use banter_proto::{Conversation, Message, User, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{ApiRequest, ApiResponse, FetchKind};

/// One page of conversation history.
///
/// Pages count backward from the newest: page 1 holds the most recent
/// `limit` messages, already in ascending creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePage {
    /// Messages of the page, ascending by creation time.
    pub messages: Vec<Message>,

    /// Total message count in the conversation.
    pub total: u64,

    /// Total page count at the requested limit.
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// REST boundary errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Data-fetch boundary of the messaging service.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetch conversation metadata. `Ok(None)` when it does not exist.
    async fn fetch_conversation(&self, id: &str) -> Result<Option<Conversation>, ApiError>;

    /// Fetch one history page.
    async fn fetch_messages(&self, id: &str, page: u32, limit: u32)
    -> Result<MessagePage, ApiError>;

    /// Fetch a user profile.
    async fn fetch_user(&self, id: &str) -> Result<User, ApiError>;

    /// Fetch every conversation the user participates in.
    async fn fetch_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError>;

    /// Create a conversation.
    async fn create_conversation(
        &self,
        user_id: &str,
        members: &[UserId],
        is_group: bool,
        group_name: &str,
    ) -> Result<(), ApiError>;

    /// Rename a group.
    async fn update_group_name(&self, id: &str, name: &str) -> Result<(), ApiError>;

    /// Add a member to a group.
    async fn add_member(&self, id: &str, member_id: &str) -> Result<(), ApiError>;

    /// Remove a member from a group.
    async fn remove_member(&self, id: &str, member_id: &str) -> Result<(), ApiError>;

    /// Delete a conversation.
    async fn delete_conversation(&self, id: &str) -> Result<(), ApiError>;

    /// Remove a friendship.
    async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<(), ApiError>;

    /// Upload a validated attachment. The server posts the resulting
    /// message and broadcasts it over the channel.
    async fn upload_attachment(
        &self,
        id: &str,
        sender_id: &str,
        attachment: &Attachment,
    ) -> Result<(), ApiError>;
}

/// Execute one request against a [`ChatApi`] and translate the result into
/// the response vocabulary. Mutations return `None` on success (there is
/// nothing to feed back); every failure becomes [`ApiResponse::Failed`].
pub async fn execute_request<A: ChatApi + ?Sized>(
    api: &A,
    request: ApiRequest,
) -> Option<ApiResponse> {
    match request {
        ApiRequest::FetchConversation { conversation_id } => {
            match api.fetch_conversation(&conversation_id).await {
                Ok(conversation) => {
                    Some(ApiResponse::Conversation { conversation_id, conversation })
                },
                Err(e) => {
                    tracing::warn!(conversation = %conversation_id, error = %e, "conversation fetch failed");
                    Some(ApiResponse::Failed {
                        request: FetchKind::Conversation,
                        conversation_id: Some(conversation_id),
                    })
                },
            }
        },
        ApiRequest::FetchMessages { conversation_id, page, limit } => {
            match api.fetch_messages(&conversation_id, page, limit).await {
                Ok(page_data) => Some(ApiResponse::Messages {
                    conversation_id,
                    page,
                    messages: page_data.messages,
                    total: page_data.total,
                    total_pages: page_data.total_pages,
                }),
                Err(e) => {
                    tracing::warn!(conversation = %conversation_id, page, error = %e, "message fetch failed");
                    Some(ApiResponse::Failed {
                        request: FetchKind::Messages,
                        conversation_id: Some(conversation_id),
                    })
                },
            }
        },
        ApiRequest::FetchUser { user_id } => match api.fetch_user(&user_id).await {
            Ok(user) => Some(ApiResponse::User { user }),
            Err(e) => {
                tracing::warn!(user = %user_id, error = %e, "user fetch failed");
                Some(ApiResponse::Failed { request: FetchKind::User, conversation_id: None })
            },
        },
        ApiRequest::FetchConversations { user_id } => {
            match api.fetch_conversations(&user_id).await {
                Ok(conversations) => Some(ApiResponse::Conversations { conversations }),
                Err(e) => {
                    tracing::warn!(user = %user_id, error = %e, "conversation list fetch failed");
                    Some(ApiResponse::Failed {
                        request: FetchKind::Conversations,
                        conversation_id: None,
                    })
                },
            }
        },
        ApiRequest::UpdateGroupName { conversation_id, name } => {
            mutation(
                api.update_group_name(&conversation_id, &name).await,
                FetchKind::Mutation,
                conversation_id,
            )
        },
        ApiRequest::AddMember { conversation_id, member_id } => {
            mutation(
                api.add_member(&conversation_id, &member_id).await,
                FetchKind::Mutation,
                conversation_id,
            )
        },
        ApiRequest::RemoveMember { conversation_id, member_id } => {
            mutation(
                api.remove_member(&conversation_id, &member_id).await,
                FetchKind::Mutation,
                conversation_id,
            )
        },
        ApiRequest::DeleteConversation { conversation_id } => {
            mutation(
                api.delete_conversation(&conversation_id).await,
                FetchKind::Mutation,
                conversation_id,
            )
        },
        ApiRequest::RemoveFriend { user_id, friend_id } => {
            match api.remove_friend(&user_id, &friend_id).await {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!(user = %user_id, friend = %friend_id, error = %e, "friend removal failed");
                    Some(ApiResponse::Failed {
                        request: FetchKind::Mutation,
                        conversation_id: None,
                    })
                },
            }
        },
        ApiRequest::Upload { conversation_id, sender_id, attachment } => {
            mutation(
                api.upload_attachment(&conversation_id, &sender_id, &attachment).await,
                FetchKind::Upload,
                conversation_id,
            )
        },
    }
}

fn mutation(
    result: Result<(), ApiError>,
    kind: FetchKind,
    conversation_id: String,
) -> Option<ApiResponse> {
    match result {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(conversation = %conversation_id, error = %e, "request failed");
            Some(ApiResponse::Failed { request: kind, conversation_id: Some(conversation_id) })
        },
    }
}
