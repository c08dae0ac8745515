//! Application input events.
//!
//! Events originate from two distinct sources:
//! - User interactions with the view (compose edits, scrolling, group
//!   management controls).
//! - Engine notifications translated from the underlying client by the
//!   [`crate::Bridge`].

use banter_core::Attachment;
use banter_proto::{Conversation, ConversationId, User, UserId};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application started: subscribe and load the conversation list.
    Started,

    /// The user selected a conversation from the list.
    ConversationSelected {
        /// Conversation to open.
        conversation_id: ConversationId,
    },

    /// The user navigated away from the open conversation.
    ConversationClosed,

    /// The compose field was edited.
    ComposeEdited {
        /// New field contents.
        text: String,
    },

    /// The user submitted the compose field.
    Submit,

    /// The user picked an attachment to upload.
    AttachmentPicked {
        /// The staged attachment.
        attachment: Attachment,
    },

    /// The message area was scrolled.
    ScrollChanged {
        /// Distance from the top of the content.
        offset: f64,
        /// Total content height.
        content_height: f64,
    },

    /// The message area's content height changed after a render.
    ContentResized {
        /// New total content height.
        content_height: f64,
    },

    /// The user submitted a new group name.
    RenameSubmitted {
        /// The new name.
        name: String,
    },

    /// The user toggled the strict-mode switch.
    StrictToggled,

    /// The user picked a friend to add to the group.
    MemberPicked {
        /// User to add.
        member_id: UserId,
    },

    /// The user removed a group member.
    MemberRemoved {
        /// User to remove.
        member_id: UserId,
    },

    /// The user deleted the group.
    GroupDeleted,

    /// The user left the group.
    GroupLeft,

    /// The user removed the direct-chat contact.
    ContactRemoved,

    /// Engine: the open conversation's metadata was loaded or replaced.
    ConversationLoaded {
        /// The fresh metadata.
        conversation: Conversation,
    },

    /// Engine: the open conversation no longer exists.
    ConversationGone,

    /// Engine: a message was appended to the open conversation.
    MessagesArrived,

    /// Engine: older history was prepended to the open conversation.
    HistoryPrepended {
        /// How many messages were inserted.
        prepended: usize,
    },

    /// Engine: the typing set changed.
    TypingChanged {
        /// Users currently typing.
        users: Vec<UserId>,
    },

    /// Engine: the strict flag changed.
    StrictChanged {
        /// Whether strict mode is now enabled.
        is_strict: bool,
    },

    /// Engine: a conversation was created.
    ConversationCreated(Conversation),

    /// Engine: the conversation list was loaded.
    ConversationsLoaded {
        /// Conversations the local user participates in.
        conversations: Vec<Conversation>,
    },

    /// Engine: a user profile was resolved for the name directory.
    UserResolved {
        /// The fetched profile.
        user: User,
    },

    /// A validation or channel error to surface as a transient notice.
    Error {
        /// User-facing description.
        message: String,
    },
}
