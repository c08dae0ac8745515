//! Application side-effects and intents.
//!
//! [`AppAction`] values are instructions produced by the [`crate::App`]
//! state machine. Engine operations are routed through the
//! [`crate::Bridge`]; view effects and data needs are executed by the
//! runtime against the [`crate::Driver`].

use banter_core::Attachment;
use banter_proto::{ConversationId, UserId};

/// Actions produced by the App state machine.
#[derive(Debug, Clone)]
pub enum AppAction {
    /// Render the view.
    Render,

    /// Subscribe to list updates and load the conversation list.
    Register,

    /// Open a conversation in the engine.
    Open {
        /// Conversation to open.
        conversation_id: ConversationId,
    },

    /// Close the open conversation in the engine.
    Close,

    /// Forward a typing edge to the engine.
    NotifyTyping {
        /// `true` when the local user started typing.
        typing: bool,
    },

    /// Send the composed message.
    SendMessage {
        /// Trimmed message text.
        content: String,
    },

    /// Upload an attachment.
    SendAttachment {
        /// The staged attachment.
        attachment: Attachment,
    },

    /// Load the next older history page.
    LoadOlder,

    /// Rename the open group.
    Rename {
        /// The new name.
        name: String,
    },

    /// Toggle the open group's strict flag.
    ToggleStrict,

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
    LeaveGroup,

    /// Delete the open conversation.
    DeleteConversation,

    /// Remove the direct-chat contact and tear the conversation down.
    RemoveContact,

    /// Scroll the message area to the bottom.
    ScrollToBottom,

    /// Restore the message area scroll offset after a prepend.
    SetScroll {
        /// Offset from the top of the content.
        offset: f64,
    },

    /// Fetch a user profile to populate the name directory.
    ResolveUser {
        /// User to resolve.
        user_id: UserId,
    },
}
