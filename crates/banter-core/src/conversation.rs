//! Open-conversation metadata and the fire-and-reconcile update path.
//!
//! Local mutations never touch this state: intents go out over the channel
//! and the authoritative result arrives back as a `chatUpdated`
//! replacement, an `adjustStrict` flag change, or a notice-triggered
//! refetch. The send-permission predicate is evaluated fresh on every call
//! so a strictness change takes effect the moment its event lands.

use banter_proto::Conversation;

/// Result of applying a remote conversation update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationUpdate {
    /// The update replaced the open conversation's metadata.
    Replaced,
    /// The conversation was deleted server-side.
    Closed,
    /// The update targeted a different conversation and was ignored.
    Ignored,
}

/// Metadata slot for the currently open conversation.
///
/// Tracks the open conversation id from the moment the conversation is
/// opened, before the metadata fetch lands, so late responses and updates
/// for other conversations can be told apart.
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    open_id: Option<String>,
    current: Option<Conversation>,
}

impl ConversationState {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a conversation by id. Clears any previous metadata.
    pub fn open(&mut self, id: String) {
        self.open_id = Some(id);
        self.current = None;
    }

    /// Close the slot entirely.
    pub fn close(&mut self) {
        self.open_id = None;
        self.current = None;
    }

    /// Store fetched metadata for the open conversation. Metadata for any
    /// other conversation is dropped.
    pub fn seed(&mut self, conversation: Conversation) -> bool {
        if self.open_id.as_deref() != Some(conversation.id.as_str()) {
            return false;
        }
        if !conversation.is_valid() {
            tracing::warn!(
                conversation = %conversation.id,
                "conversation violates structural invariants"
            );
        }
        self.current = Some(conversation);
        true
    }

    /// Apply a remote `chatUpdated` event.
    pub fn apply_update(&mut self, update: Option<Conversation>) -> ConversationUpdate {
        match update {
            Some(conversation) => {
                if self.seed(conversation) {
                    ConversationUpdate::Replaced
                } else {
                    ConversationUpdate::Ignored
                }
            },
            None => {
                self.current = None;
                ConversationUpdate::Closed
            },
        }
    }

    /// Apply a remote strict-flag change. Returns false when no metadata
    /// is loaded yet.
    pub fn set_strict(&mut self, is_strict: bool) -> bool {
        match self.current.as_mut() {
            Some(conversation) => {
                conversation.is_strict = is_strict;
                true
            },
            None => false,
        }
    }

    /// Id of the open conversation, if any.
    pub fn id(&self) -> Option<&str> {
        self.open_id.as_deref()
    }

    /// Loaded metadata, if the fetch has landed.
    pub fn get(&self) -> Option<&Conversation> {
        self.current.as_ref()
    }

    /// Whether a conversation is open (metadata may still be in flight).
    pub fn is_open(&self) -> bool {
        self.open_id.is_some()
    }

    /// Whether `user` may post right now. False until metadata is loaded.
    pub fn can_send(&self, user: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.can_send(user))
    }
}
