//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the messaging UI completely decoupled from I/O and
//! engine mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs
//! and produces [`crate::AppAction`] instructions for the runtime to
//! execute.
//!
//! # Responsibilities
//!
//! - Tracks the conversation list and the active conversation's view state
//!   (compose field, viewport, typing snapshot).
//! - Maintains the user-name directory backing display names and the
//!   typing indicator.
//! - Gates composing and submitting on the send-permission predicate, so
//!   strict mode disables the control for non-owners the moment the flag
//!   flips.

use std::collections::HashMap;

use banter_proto::{Conversation, ConversationId, UserId};

use crate::{AppAction, AppEvent, Compose, TypingSignal, Viewport};

/// Display-name fallback for unresolved users.
const UNKNOWN_USER: &str = "Unknown User";

/// Name used in the typing indicator while a profile is unresolved.
const SOMEONE: &str = "Someone";

/// View state for the open conversation.
#[derive(Debug, Clone)]
struct ActiveView {
    conversation_id: ConversationId,
    /// Loaded metadata. `None` while the fetch is in flight or after the
    /// conversation was deleted server-side.
    conversation: Option<Conversation>,
    compose: Compose,
    viewport: Viewport,
    typing_users: Vec<UserId>,
}

impl ActiveView {
    fn new(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            conversation: None,
            compose: Compose::new(),
            viewport: Viewport::new(),
            typing_users: Vec::new(),
        }
    }
}

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable without a runtime.
#[derive(Debug, Clone)]
pub struct App {
    /// The local user.
    local_user: UserId,
    /// Conversation list, newest activity not tracked here (server order).
    conversations: Vec<Conversation>,
    /// Resolved display names.
    directory: HashMap<UserId, String>,
    /// The open conversation's view state. `None` on the list screen.
    active: Option<ActiveView>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given local user.
    pub fn new(local_user: UserId) -> Self {
        Self {
            local_user,
            conversations: Vec::new(),
            directory: HashMap::new(),
            active: None,
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Started => vec![AppAction::Register, AppAction::Render],
            AppEvent::ConversationSelected { conversation_id } => {
                self.active = Some(ActiveView::new(conversation_id.clone()));
                vec![AppAction::Open { conversation_id }, AppAction::Render]
            },
            AppEvent::ConversationClosed => {
                self.active = None;
                vec![AppAction::Close, AppAction::Render]
            },
            AppEvent::ComposeEdited { text } => self.compose_edited(text),
            AppEvent::Submit => self.submit(),
            AppEvent::AttachmentPicked { attachment } => {
                if !self.can_send() {
                    return vec![];
                }
                vec![AppAction::SendAttachment { attachment }, AppAction::Render]
            },
            AppEvent::ScrollChanged { offset, content_height } => {
                let Some(active) = self.active.as_mut() else {
                    return vec![];
                };
                active.viewport.record(offset, content_height);
                if active.viewport.at_top() {
                    vec![AppAction::LoadOlder]
                } else {
                    vec![]
                }
            },
            AppEvent::ContentResized { content_height } => {
                let Some(active) = self.active.as_mut() else {
                    return vec![];
                };
                match active.viewport.apply_prepend(content_height) {
                    Some(offset) => vec![AppAction::SetScroll { offset }, AppAction::Render],
                    None => {
                        let offset = active.viewport.offset();
                        active.viewport.record(offset, content_height);
                        vec![]
                    },
                }
            },
            AppEvent::RenameSubmitted { name } => {
                vec![AppAction::Rename { name }, AppAction::Render]
            },
            AppEvent::StrictToggled => vec![AppAction::ToggleStrict, AppAction::Render],
            AppEvent::MemberPicked { member_id } => {
                vec![AppAction::AddMember { member_id }, AppAction::Render]
            },
            AppEvent::MemberRemoved { member_id } => {
                vec![AppAction::RemoveMember { member_id }, AppAction::Render]
            },
            AppEvent::GroupDeleted => vec![AppAction::DeleteConversation, AppAction::Render],
            AppEvent::GroupLeft => vec![AppAction::LeaveGroup, AppAction::Render],
            AppEvent::ContactRemoved => vec![AppAction::RemoveContact, AppAction::Render],
            AppEvent::ConversationLoaded { conversation } => {
                self.conversation_loaded(conversation)
            },
            AppEvent::ConversationGone => {
                if let Some(active) = self.active.as_mut() {
                    active.conversation = None;
                    active.typing_users.clear();
                }
                vec![AppAction::Render]
            },
            AppEvent::MessagesArrived => vec![AppAction::ScrollToBottom, AppAction::Render],
            AppEvent::HistoryPrepended { prepended: _ } => {
                if let Some(active) = self.active.as_mut() {
                    active.viewport.begin_anchor();
                }
                vec![AppAction::Render]
            },
            AppEvent::TypingChanged { users } => {
                if let Some(active) = self.active.as_mut() {
                    active.typing_users = users;
                }
                vec![AppAction::Render]
            },
            AppEvent::StrictChanged { is_strict } => {
                if let Some(conversation) =
                    self.active.as_mut().and_then(|a| a.conversation.as_mut())
                {
                    conversation.is_strict = is_strict;
                }
                vec![AppAction::Render]
            },
            AppEvent::ConversationCreated(conversation) => {
                self.conversation_created(conversation)
            },
            AppEvent::ConversationsLoaded { conversations } => {
                self.conversations = conversations;
                let mut actions = self.resolve_counterparts();
                actions.push(AppAction::Render);
                actions
            },
            AppEvent::UserResolved { user } => {
                self.directory.insert(user.id, user.name);
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(message);
                vec![AppAction::Render]
            },
        }
    }

    fn compose_edited(&mut self, text: String) -> Vec<AppAction> {
        if !self.can_send() {
            return vec![];
        }
        let Some(active) = self.active.as_mut() else {
            return vec![];
        };
        match active.compose.edit(text) {
            Some(TypingSignal::Started) => {
                vec![AppAction::NotifyTyping { typing: true }, AppAction::Render]
            },
            Some(TypingSignal::Stopped) => {
                vec![AppAction::NotifyTyping { typing: false }, AppAction::Render]
            },
            None => vec![AppAction::Render],
        }
    }

    fn submit(&mut self) -> Vec<AppAction> {
        if !self.can_send() {
            return vec![];
        }
        let Some(active) = self.active.as_mut() else {
            return vec![];
        };
        if active.compose.text().trim().is_empty() {
            return vec![];
        }
        let content = active.compose.take();
        vec![AppAction::SendMessage { content }, AppAction::Render]
    }

    fn conversation_loaded(&mut self, conversation: Conversation) -> Vec<AppAction> {
        let mut actions = self.resolve_members(&conversation);

        if let Some(entry) =
            self.conversations.iter_mut().find(|c| c.id == conversation.id)
        {
            *entry = conversation.clone();
        }
        if let Some(active) = self.active.as_mut()
            && active.conversation_id == conversation.id
        {
            active.conversation = Some(conversation);
        }

        actions.push(AppAction::Render);
        actions
    }

    fn conversation_created(&mut self, conversation: Conversation) -> Vec<AppAction> {
        let mut actions = self.resolve_members(&conversation);

        match self.conversations.iter_mut().find(|c| c.id == conversation.id) {
            Some(entry) => *entry = conversation,
            None => self.conversations.push(conversation),
        }

        actions.push(AppAction::Render);
        actions
    }

    /// Resolve names for every member of `conversation` other than the
    /// local user that is not in the directory yet.
    fn resolve_members(&self, conversation: &Conversation) -> Vec<AppAction> {
        conversation
            .members
            .iter()
            .filter(|m| **m != self.local_user && !self.directory.contains_key(*m))
            .map(|m| AppAction::ResolveUser { user_id: m.clone() })
            .collect()
    }

    /// Resolve names for every direct-chat counterpart in the list.
    fn resolve_counterparts(&self) -> Vec<AppAction> {
        self.conversations
            .iter()
            .filter(|c| !c.is_group)
            .filter_map(|c| c.other_member(&self.local_user))
            .filter(|m| !self.directory.contains_key(*m))
            .map(|m| AppAction::ResolveUser { user_id: m.clone() })
            .collect()
    }

    /// The local user this app acts as.
    pub fn local_user(&self) -> &str {
        &self.local_user
    }

    /// The conversation list, in server order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// Group conversations only.
    pub fn group_conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter().filter(|c| c.is_group)
    }

    /// Direct conversations only.
    pub fn direct_conversations(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter().filter(|c| !c.is_group)
    }

    /// Metadata of the open conversation, once loaded.
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active.as_ref().and_then(|a| a.conversation.as_ref())
    }

    /// Id of the open conversation, if any.
    pub fn active_conversation_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.conversation_id.as_str())
    }

    /// Current compose field contents.
    pub fn compose_text(&self) -> &str {
        self.active.as_ref().map_or("", |a| a.compose.text())
    }

    /// Whether the local user may post right now. Mirrors the engine's
    /// boundary predicate and is re-evaluated on every call.
    pub fn can_send(&self) -> bool {
        self.active_conversation().is_some_and(|c| c.can_send(&self.local_user))
    }

    /// Whether the local user owns the open conversation. Owner-only
    /// controls (rename, strict toggle, delete) render iff this is true.
    pub fn is_owner(&self) -> bool {
        self.active_conversation().is_some_and(|c| c.owner_id == self.local_user)
    }

    /// Display name for a user, falling back to a placeholder while the
    /// profile is unresolved.
    pub fn display_name(&self, user_id: &str) -> &str {
        self.directory.get(user_id).map_or(UNKNOWN_USER, String::as_str)
    }

    /// List/header title for a conversation: the group name, or the
    /// counterpart's display name for a direct chat.
    pub fn conversation_title<'a>(&'a self, conversation: &'a Conversation) -> &'a str {
        if conversation.is_group {
            conversation.group_name.as_deref().unwrap_or(UNKNOWN_USER)
        } else {
            conversation
                .other_member(&self.local_user)
                .map_or(UNKNOWN_USER, |m| self.display_name(m))
        }
    }

    /// Typing indicator text per the rendering contract: nobody typing
    /// yields no indicator, one user is named, several in a group produce
    /// a generic line without enumerating names. Suppressed entirely
    /// while strict mode is enabled.
    pub fn typing_indicator(&self) -> Option<String> {
        let active = self.active.as_ref()?;
        let conversation = active.conversation.as_ref()?;
        if conversation.is_strict || active.typing_users.is_empty() {
            return None;
        }
        if active.typing_users.len() == 1 {
            let name = self
                .directory
                .get(&active.typing_users[0])
                .map_or(SOMEONE, String::as_str);
            return Some(format!("{name} is typing..."));
        }
        Some("Multiple people are typing...".to_owned())
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Dismiss the transient status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
