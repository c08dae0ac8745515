//! Wire types for the Banter messaging service.
//!
//! Defines the data model (messages, conversations, users) and the
//! named-event envelope carried by the bidirectional event channel. All
//! types mirror the server's JSON wire format exactly; serde renames map
//! Rust naming to the wire's `_id`/`groupName`/`type` spellings.
//!
//! # Components
//!
//! - [`Message`], [`Conversation`], [`User`]: the data model
//! - [`ServerEvent`]: inbound events (server to client)
//! - [`ClientIntent`]: outbound intents (client to server)

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod event;
mod model;

pub use event::{
    AdjustMember, ClientIntent, GroupNameUpdate, SendMessage, ServerEvent, StrictChange,
    TypingEvent, TypingIntent,
};
pub use model::{Conversation, ConversationId, Message, MessageId, MessageKind, User, UserId};
