//! Named events carried by the bidirectional channel.
//!
//! The channel speaks tagged JSON envelopes of the form
//! `{"event": <name>, "data": <payload>}`. Inbound events only arrive for
//! rooms the client has joined (one room per open conversation), plus the
//! per-user subscription feeding the conversation list. Outbound intents
//! are fire-and-forget: local state changes only when the corresponding
//! inbound event or refetch arrives.

use serde::{Deserialize, Serialize};

use crate::{Conversation, ConversationId, Message, UserId};

/// Events pushed by the server over the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A message was posted to the joined conversation. May be redelivered;
    /// the message id is the dedup key.
    #[serde(rename = "newMessage")]
    NewMessage(Message),

    /// A member started typing.
    #[serde(rename = "typing")]
    Typing(TypingEvent),

    /// A member stopped typing.
    #[serde(rename = "stopTyping")]
    StopTyping(TypingEvent),

    /// The conversation was replaced with fresh authoritative state, or
    /// deleted (`null`).
    #[serde(rename = "chatUpdated")]
    ChatUpdated(Option<Conversation>),

    /// The conversation's strict flag changed.
    #[serde(rename = "adjustStrict")]
    AdjustStrict(StrictChange),

    /// A conversation involving the subscribed user was created.
    #[serde(rename = "chatCreated")]
    ChatCreated(Conversation),

    /// Out-of-band channel error.
    #[serde(rename = "error")]
    Error(String),
}

/// Who is typing, as carried by inbound `typing`/`stopTyping` events.
/// Already scoped to the joined room, so only the sender is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingEvent {
    /// The member whose typing state changed.
    pub sender_id: UserId,
}

/// New strict-mode flag, carried by inbound `adjustStrict` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrictChange {
    /// Whether strict mode is now enabled.
    pub is_strict: bool,
}

/// Intents emitted to the server over the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientIntent {
    /// Join the room for a conversation; inbound events for it start
    /// arriving after this.
    #[serde(rename = "joinChat")]
    JoinChat(ConversationId),

    /// Leave a conversation's room.
    #[serde(rename = "leaveChat")]
    LeaveChat(ConversationId),

    /// Post a message. The server assigns the canonical id and broadcasts
    /// the result as `newMessage`.
    #[serde(rename = "sendMessage")]
    SendMessage(SendMessage),

    /// The local user started typing.
    #[serde(rename = "typing")]
    Typing(TypingIntent),

    /// The local user stopped typing.
    #[serde(rename = "stopTyping")]
    StopTyping(TypingIntent),

    /// Announce a group rename so the server posts the matching notice.
    #[serde(rename = "sendNotiUpdateGroupName")]
    UpdateGroupName(GroupNameUpdate),

    /// Announce a membership change so the server posts the matching
    /// notice.
    #[serde(rename = "sendNotiAdjustMember")]
    AdjustMember(AdjustMember),

    /// Ask the server to toggle the conversation's strict flag.
    #[serde(rename = "adjustStrict")]
    AdjustStrict(ConversationId),

    /// Subscribe to conversation-list updates for a user.
    #[serde(rename = "subscribeToUser")]
    SubscribeToUser(UserId),
}

/// `sendMessage` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    /// Target conversation.
    pub chat_id: ConversationId,

    /// Author.
    pub sender_id: UserId,

    /// Message text.
    pub content: String,

    /// Producer-side idempotency key, letting the server and any replaying
    /// channel deduplicate without relying on incidental id stability.
    pub client_msg_id: String,
}

/// Outbound `typing`/`stopTyping` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingIntent {
    /// Conversation the signal applies to.
    pub chat_id: ConversationId,

    /// The local user.
    pub sender_id: UserId,
}

/// `sendNotiUpdateGroupName` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNameUpdate {
    /// Renamed conversation.
    pub chat_id: ConversationId,

    /// Who renamed it.
    pub sender_id: UserId,

    /// The new name.
    #[serde(rename = "groupName")]
    pub group_name: String,
}

/// `sendNotiAdjustMember` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustMember {
    /// Affected conversation.
    pub chat_id: ConversationId,

    /// Who performed the change (the conversation owner, or the member
    /// themselves when leaving).
    pub sender_id: UserId,

    /// The member that was added or removed.
    pub member_id: UserId,

    /// `true` for an addition, `false` for a removal.
    #[serde(rename = "isAdd")]
    pub is_add: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_chat_uses_wire_name() -> Result<(), serde_json::Error> {
        let intent = ClientIntent::JoinChat("c1".into());
        let json = serde_json::to_value(&intent)?;
        assert_eq!(json, serde_json::json!({"event": "joinChat", "data": "c1"}));
        Ok(())
    }

    #[test]
    fn send_message_carries_idempotency_key() -> Result<(), serde_json::Error> {
        let intent = ClientIntent::SendMessage(SendMessage {
            chat_id: "c1".into(),
            sender_id: "u2".into(),
            content: "hi".into(),
            client_msg_id: "k-1".into(),
        });
        let json = serde_json::to_value(&intent)?;
        assert_eq!(json["event"], "sendMessage");
        assert_eq!(json["data"]["chat_id"], "c1");
        assert_eq!(json["data"]["client_msg_id"], "k-1");
        Ok(())
    }

    #[test]
    fn chat_updated_null_decodes_as_deletion() -> Result<(), serde_json::Error> {
        let event: ServerEvent =
            serde_json::from_str(r#"{"event": "chatUpdated", "data": null}"#)?;
        assert_eq!(event, ServerEvent::ChatUpdated(None));
        Ok(())
    }

    #[test]
    fn adjust_strict_decodes_flag() -> Result<(), serde_json::Error> {
        let event: ServerEvent =
            serde_json::from_str(r#"{"event": "adjustStrict", "data": {"is_strict": true}}"#)?;
        assert_eq!(event, ServerEvent::AdjustStrict(StrictChange { is_strict: true }));
        Ok(())
    }

    #[test]
    fn member_notice_uses_camel_case_flag() -> Result<(), serde_json::Error> {
        let intent = ClientIntent::AdjustMember(AdjustMember {
            chat_id: "c1".into(),
            sender_id: "u1".into(),
            member_id: "u3".into(),
            is_add: true,
        });
        let json = serde_json::to_value(&intent)?;
        assert_eq!(json["event"], "sendNotiAdjustMember");
        assert_eq!(json["data"]["isAdd"], true);
        Ok(())
    }
}
