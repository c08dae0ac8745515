//! Client events, actions, and the REST request/response vocabulary.

use banter_core::Attachment;
use banter_proto::{
    ClientIntent, Conversation, ConversationId, Message, ServerEvent, User, UserId,
};

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Receiving events from the channel and forwarding them as [`Server`]
/// - Executing [`ClientAction::Api`] requests and feeding results back as
///   [`Api`]
/// - Forwarding application intents (open, send, rename, ...)
///
/// [`Server`]: ClientEvent::Server
/// [`Api`]: ClientEvent::Api
#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// Register for conversation-list updates and load the list.
    Register,

    /// Open a conversation: join its room, fetch metadata and the first
    /// history page. Resets all per-conversation state.
    Open {
        /// Conversation to open.
        conversation_id: ConversationId,
    },

    /// Close the open conversation (switch away): leave the room and drop
    /// per-conversation state.
    Close,

    /// Inbound event from the channel.
    Server(ServerEvent),

    /// Result of a REST request issued earlier via [`ClientAction::Api`].
    Api(ApiResponse),

    /// The viewport reached the top of the loaded history.
    LoadOlder,

    /// The compose field flipped between empty and non-empty.
    ComposeTyping {
        /// `true` when the field became non-empty.
        typing: bool,
    },

    /// Send the composed text message.
    Send {
        /// Message text; trimmed before sending.
        content: String,
    },

    /// Upload an attachment after client-side validation.
    SendAttachment {
        /// The staged attachment.
        attachment: Attachment,
    },

    /// Rename the open group.
    Rename {
        /// New display name.
        name: String,
    },

    /// Ask the server to toggle the strict flag of the open group.
    SetStrict,

    /// Add a member to the open group.
    AddMember {
        /// User to add.
        member_id: UserId,
    },

    /// Remove a member from the open group.
    RemoveMember {
        /// User to remove.
        member_id: UserId,
    },

    /// Leave the open group.
    Leave,

    /// Delete the open conversation.
    Delete,

    /// Remove the direct counterpart as a contact, tearing the
    /// conversation down with it.
    RemoveContact,
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone)]
pub enum ClientAction {
    /// Emit an intent over the event channel.
    Emit(ClientIntent),

    /// Execute a REST request and feed the result back as
    /// [`ClientEvent::Api`].
    Api(ApiRequest),

    /// A message was added at the tail; the view should scroll to the
    /// bottom.
    ScrollToBottom,

    /// Older history was inserted above; the view should restore its
    /// anchor from the content-height delta.
    AnchorViewport {
        /// How many messages were inserted.
        prepended: usize,
    },

    /// The open conversation's metadata was replaced.
    ConversationReplaced,

    /// The open conversation no longer exists.
    ConversationGone,

    /// The typing set changed.
    TypingChanged {
        /// Users currently typing, in stable order.
        users: Vec<UserId>,
    },

    /// The strict flag changed; send permission must be re-evaluated.
    StrictChanged {
        /// Whether strict mode is now enabled.
        is_strict: bool,
    },

    /// A conversation was created (conversation-list scope).
    ConversationCreated(Conversation),
}

/// REST requests the caller executes against a [`crate::ChatApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch conversation metadata.
    FetchConversation {
        /// Target conversation.
        conversation_id: ConversationId,
    },

    /// Fetch one history page.
    FetchMessages {
        /// Target conversation.
        conversation_id: ConversationId,
        /// Page to fetch (1 = most recent).
        page: u32,
        /// Page size.
        limit: u32,
    },

    /// Fetch a user profile for display names.
    FetchUser {
        /// Target user.
        user_id: UserId,
    },

    /// Fetch every conversation a user participates in.
    FetchConversations {
        /// Target user.
        user_id: UserId,
    },

    /// Rename a group.
    UpdateGroupName {
        /// Target conversation.
        conversation_id: ConversationId,
        /// New display name.
        name: String,
    },

    /// Add a member to a group.
    AddMember {
        /// Target conversation.
        conversation_id: ConversationId,
        /// User to add.
        member_id: UserId,
    },

    /// Remove a member from a group.
    RemoveMember {
        /// Target conversation.
        conversation_id: ConversationId,
        /// User to remove.
        member_id: UserId,
    },

    /// Delete a conversation.
    DeleteConversation {
        /// Target conversation.
        conversation_id: ConversationId,
    },

    /// Remove a friendship.
    RemoveFriend {
        /// The local user.
        user_id: UserId,
        /// The contact to remove.
        friend_id: UserId,
    },

    /// Upload a validated attachment. The server broadcasts the resulting
    /// message over the channel.
    Upload {
        /// Target conversation.
        conversation_id: ConversationId,
        /// Uploading user.
        sender_id: UserId,
        /// The validated attachment.
        attachment: Attachment,
    },
}

/// Results of REST requests, fed back as [`ClientEvent::Api`].
#[derive(Debug, Clone)]
pub enum ApiResponse {
    /// Conversation metadata. `None` when the conversation does not exist.
    Conversation {
        /// Conversation the request targeted.
        conversation_id: ConversationId,
        /// The fetched metadata.
        conversation: Option<Conversation>,
    },

    /// One history page.
    Messages {
        /// Conversation the request targeted.
        conversation_id: ConversationId,
        /// Page that was fetched.
        page: u32,
        /// Messages in ascending creation order.
        messages: Vec<Message>,
        /// Total message count in the conversation.
        total: u64,
        /// Total page count at the requested limit.
        total_pages: u32,
    },

    /// A user profile.
    User {
        /// The fetched profile.
        user: User,
    },

    /// The conversation list for the local user.
    Conversations {
        /// Conversations the user participates in.
        conversations: Vec<Conversation>,
    },

    /// A request failed (network or non-success status). Logged and
    /// swallowed; never retried automatically.
    Failed {
        /// What kind of request failed.
        request: FetchKind,
        /// Conversation the request targeted, when applicable.
        conversation_id: Option<ConversationId>,
    },
}

/// Request classification for failure reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Conversation metadata fetch.
    Conversation,
    /// History page fetch.
    Messages,
    /// User profile fetch.
    User,
    /// Conversation list fetch.
    Conversations,
    /// A state-changing request (rename, membership, delete, ...).
    Mutation,
    /// An attachment upload.
    Upload,
}
