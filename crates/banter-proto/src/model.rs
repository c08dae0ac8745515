//! Data model shared by the REST boundary and the event channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique message identifier assigned by the server.
pub type MessageId = String;

/// Unique user identifier.
pub type UserId = String;

/// Unique conversation identifier.
pub type ConversationId = String;

/// Payload kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageKind {
    /// Ordinary text message.
    #[default]
    #[serde(rename = "normal")]
    Normal,

    /// Synthetic message signaling an out-of-band conversation-state
    /// change (membership, rename). Receiving one prompts a metadata
    /// refetch, since the notice text does not fully describe the change.
    #[serde(rename = "noti")]
    Notice,

    /// Uploaded document; `content` is its URI.
    #[serde(rename = "file")]
    File,

    /// Uploaded image; `content` is its URI.
    #[serde(rename = "image")]
    Image,
}

/// A single message within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Server-assigned identifier, unique within the conversation and
    /// stable across sync sources.
    #[serde(rename = "_id")]
    pub id: MessageId,

    /// Author of the message.
    pub sender_id: UserId,

    /// Opaque payload: text for `Normal`/`Notice`, a URI for
    /// `File`/`Image`.
    pub content: String,

    /// Payload kind. Absent on the wire means `Normal`.
    #[serde(rename = "type", default)]
    pub kind: MessageKind,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Tombstone marker. A deleted message stays in the sequence with its
    /// content suppressed by the view, preserving ordering and counts.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Whether this message has been deleted (tombstoned).
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Content for display. `None` when tombstoned.
    pub fn visible_content(&self) -> Option<&str> {
        if self.is_deleted() { None } else { Some(&self.content) }
    }
}

/// A direct (2-member) or group (N-member) messaging context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: ConversationId,

    /// Owner of the conversation. Always a member.
    pub owner_id: UserId,

    /// Whether this is a group conversation.
    pub is_group: bool,

    /// Member user ids. Unique; ordered only for display.
    pub members: Vec<UserId>,

    /// Display name. Present iff this is a group.
    #[serde(rename = "groupName", default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Strict mode: when set, only the owner may post.
    pub is_strict: bool,
}

impl Conversation {
    /// Whether `user` is a member.
    pub fn is_member(&self, user: &str) -> bool {
        self.members.iter().any(|m| m == user)
    }

    /// The single counterpart in a direct conversation. `None` for groups
    /// or when `me` has no counterpart.
    pub fn other_member(&self, me: &str) -> Option<&UserId> {
        if self.is_group {
            return None;
        }
        self.members.iter().find(|m| *m != me)
    }

    /// Whether `user` may post right now. Evaluated fresh on every call so
    /// strictness changes take effect immediately: a member may send iff
    /// the conversation is not strict, or they own it.
    pub fn can_send(&self, user: &str) -> bool {
        self.is_member(user) && (!self.is_strict || self.owner_id == user)
    }

    /// Structural invariants: the owner is a member, and a direct
    /// conversation has exactly two members.
    pub fn is_valid(&self) -> bool {
        self.is_member(&self.owner_id) && (self.is_group || self.members.len() == 2)
    }
}

/// A user profile, as returned by the user-fetch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,
}
