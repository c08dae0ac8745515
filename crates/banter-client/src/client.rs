//! Conversation engine state machine.
//!
//! The `Client` is the top-level state machine for one open conversation.
//! It owns the message store, pagination cursor, typing set, and
//! conversation metadata, and reconciles three inputs into one consistent
//! view: the paginated history fetches, the live event stream, and local
//! user intents.
//!
//! Local mutations are fire-and-reconcile: they emit intents (and REST
//! requests) without touching local state; state changes only when the
//! authoritative inbound event or refetch result arrives. Fetch responses
//! are tagged with the conversation id, so responses that land after a
//! switch-away are discarded instead of polluting the next conversation.

use banter_core::{
    Appended, ConversationState, ConversationUpdate, MessageStore, Paginator, SendError,
    TypingTracker,
};
use banter_proto::{
    AdjustMember, ClientIntent, Conversation, GroupNameUpdate, Message, MessageKind, SendMessage,
    ServerEvent, TypingIntent, UserId,
};

use crate::{
    error::ClientError,
    event::{ApiRequest, ApiResponse, ClientAction, ClientEvent, FetchKind},
};

/// History page size used for the seed fetch and backward loads.
pub const PAGE_SIZE: u32 = 20;

/// Client state machine for one open conversation.
///
/// Pure state machine: no I/O, fully testable with scripted events.
#[derive(Debug, Clone)]
pub struct Client {
    /// The local user all permission checks run against.
    local_user: UserId,
    /// Open-conversation metadata and send permission.
    conversation: ConversationState,
    /// Message history.
    store: MessageStore,
    /// Backward pagination cursor.
    paginator: Paginator,
    /// Who is typing right now.
    typing: TypingTracker,
}

impl Client {
    /// Create a client for the given local user.
    pub fn new(local_user: UserId) -> Self {
        Self {
            local_user,
            conversation: ConversationState::new(),
            store: MessageStore::new(),
            paginator: Paginator::new(),
            typing: TypingTracker::new(),
        }
    }

    /// Process an event and return the actions to execute.
    pub fn handle(&mut self, event: ClientEvent) -> Result<Vec<ClientAction>, ClientError> {
        match event {
            ClientEvent::Register => Ok(self.register()),
            ClientEvent::Open { conversation_id } => Ok(self.open(conversation_id)),
            ClientEvent::Close => Ok(self.close()),
            ClientEvent::Server(server_event) => Ok(self.handle_server(server_event)),
            ClientEvent::Api(response) => Ok(self.handle_api(response)),
            ClientEvent::LoadOlder => Ok(self.load_older()),
            ClientEvent::ComposeTyping { typing } => Ok(self.compose_typing(typing)),
            ClientEvent::Send { content } => self.send(&content),
            ClientEvent::SendAttachment { attachment } => self.send_attachment(attachment),
            ClientEvent::Rename { name } => self.rename(name),
            ClientEvent::SetStrict => self.set_strict(),
            ClientEvent::AddMember { member_id } => self.adjust_member(member_id, true),
            ClientEvent::RemoveMember { member_id } => self.adjust_member(member_id, false),
            ClientEvent::Leave => self.leave(),
            ClientEvent::Delete => self.delete(),
            ClientEvent::RemoveContact => self.remove_contact(),
        }
    }

    fn register(&self) -> Vec<ClientAction> {
        vec![
            ClientAction::Emit(ClientIntent::SubscribeToUser(self.local_user.clone())),
            ClientAction::Api(ApiRequest::FetchConversations { user_id: self.local_user.clone() }),
        ]
    }

    fn open(&mut self, conversation_id: String) -> Vec<ClientAction> {
        let mut actions = Vec::new();
        if let Some(previous) = self.conversation.id() {
            actions.push(ClientAction::Emit(ClientIntent::LeaveChat(previous.to_owned())));
        }
        self.reset_conversation_state();
        self.conversation.open(conversation_id.clone());

        actions.push(ClientAction::Emit(ClientIntent::JoinChat(conversation_id.clone())));
        actions.push(ClientAction::Api(ApiRequest::FetchConversation {
            conversation_id: conversation_id.clone(),
        }));
        actions.push(ClientAction::Api(ApiRequest::FetchMessages {
            conversation_id,
            page: 1,
            limit: PAGE_SIZE,
        }));
        actions
    }

    fn close(&mut self) -> Vec<ClientAction> {
        let Some(id) = self.conversation.id().map(str::to_owned) else {
            return vec![];
        };
        self.reset_conversation_state();
        self.conversation.close();
        vec![ClientAction::Emit(ClientIntent::LeaveChat(id))]
    }

    fn reset_conversation_state(&mut self) {
        self.store.clear();
        self.paginator = Paginator::new();
        self.typing.clear();
    }

    fn load_older(&mut self) -> Vec<ClientAction> {
        let Some(id) = self.conversation.id().map(str::to_owned) else {
            return vec![];
        };
        match self.paginator.begin_load() {
            Some(page) => vec![ClientAction::Api(ApiRequest::FetchMessages {
                conversation_id: id,
                page,
                limit: PAGE_SIZE,
            })],
            None => vec![],
        }
    }

    fn compose_typing(&self, typing: bool) -> Vec<ClientAction> {
        let Some(id) = self.conversation.id() else {
            return vec![];
        };
        let signal = TypingIntent { chat_id: id.to_owned(), sender_id: self.local_user.clone() };
        if typing {
            vec![ClientAction::Emit(ClientIntent::Typing(signal))]
        } else {
            vec![ClientAction::Emit(ClientIntent::StopTyping(signal))]
        }
    }

    fn send(&mut self, content: &str) -> Result<Vec<ClientAction>, ClientError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SendError::Empty.into());
        }
        let Some(id) = self.conversation.id().map(str::to_owned) else {
            return Err(SendError::NoConversation.into());
        };
        let Some(conversation) = self.conversation.get() else {
            return Err(SendError::NoConversation.into());
        };
        if !conversation.is_member(&self.local_user) {
            return Err(SendError::NotMember.into());
        }
        if !conversation.can_send(&self.local_user) {
            return Err(SendError::NotPermitted.into());
        }

        // The store is not touched: the message comes back as `newMessage`
        // with its server-assigned id.
        let stop = TypingIntent { chat_id: id.clone(), sender_id: self.local_user.clone() };
        Ok(vec![
            ClientAction::Emit(ClientIntent::SendMessage(SendMessage {
                chat_id: id,
                sender_id: self.local_user.clone(),
                content: content.to_owned(),
                client_msg_id: uuid::Uuid::new_v4().to_string(),
            })),
            ClientAction::Emit(ClientIntent::StopTyping(stop)),
        ])
    }

    fn send_attachment(
        &mut self,
        attachment: banter_core::Attachment,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let Some(id) = self.conversation.id().map(str::to_owned) else {
            return Err(SendError::NoConversation.into());
        };
        if !self.conversation.can_send(&self.local_user) {
            return Err(SendError::NotPermitted.into());
        }
        attachment.validate()?;
        Ok(vec![ClientAction::Api(ApiRequest::Upload {
            conversation_id: id,
            sender_id: self.local_user.clone(),
            attachment,
        })])
    }

    fn rename(&mut self, name: String) -> Result<Vec<ClientAction>, ClientError> {
        let conversation = self.open_group()?;
        let name = name.trim().to_owned();
        if name.is_empty() || conversation.group_name.as_deref() == Some(name.as_str()) {
            return Ok(vec![]);
        }
        let id = conversation.id.clone();
        Ok(vec![
            ClientAction::Api(ApiRequest::UpdateGroupName {
                conversation_id: id.clone(),
                name: name.clone(),
            }),
            ClientAction::Emit(ClientIntent::UpdateGroupName(GroupNameUpdate {
                chat_id: id,
                sender_id: self.local_user.clone(),
                group_name: name,
            })),
        ])
    }

    fn set_strict(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let conversation = self.open_group()?;
        Ok(vec![ClientAction::Emit(ClientIntent::AdjustStrict(conversation.id.clone()))])
    }

    fn adjust_member(
        &mut self,
        member_id: UserId,
        is_add: bool,
    ) -> Result<Vec<ClientAction>, ClientError> {
        let conversation = self.open_group()?;
        let id = conversation.id.clone();
        let owner = conversation.owner_id.clone();
        let api = if is_add {
            ApiRequest::AddMember { conversation_id: id.clone(), member_id: member_id.clone() }
        } else {
            ApiRequest::RemoveMember { conversation_id: id.clone(), member_id: member_id.clone() }
        };
        Ok(vec![
            ClientAction::Api(api),
            ClientAction::Emit(ClientIntent::AdjustMember(AdjustMember {
                chat_id: id,
                sender_id: owner,
                member_id,
                is_add,
            })),
        ])
    }

    fn leave(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let conversation = self.open_group()?;
        let id = conversation.id.clone();
        let owner = conversation.owner_id.clone();
        Ok(vec![
            ClientAction::Api(ApiRequest::RemoveMember {
                conversation_id: id.clone(),
                member_id: self.local_user.clone(),
            }),
            ClientAction::Emit(ClientIntent::AdjustMember(AdjustMember {
                chat_id: id,
                sender_id: owner,
                member_id: self.local_user.clone(),
                is_add: false,
            })),
        ])
    }

    fn delete(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let Some(id) = self.conversation.id().map(str::to_owned) else {
            return Err(ClientError::NoConversation);
        };
        Ok(vec![ClientAction::Api(ApiRequest::DeleteConversation { conversation_id: id })])
    }

    fn remove_contact(&mut self) -> Result<Vec<ClientAction>, ClientError> {
        let Some(conversation) = self.conversation.get() else {
            return Err(ClientError::NoConversation);
        };
        if conversation.is_group {
            return Err(ClientError::NotDirect);
        }
        let Some(other) = conversation.other_member(&self.local_user).cloned() else {
            return Ok(vec![]);
        };
        let id = conversation.id.clone();
        Ok(vec![
            ClientAction::Api(ApiRequest::RemoveFriend {
                user_id: self.local_user.clone(),
                friend_id: other,
            }),
            ClientAction::Api(ApiRequest::DeleteConversation { conversation_id: id }),
        ])
    }

    fn open_group(&self) -> Result<&Conversation, ClientError> {
        let conversation = self.conversation.get().ok_or(ClientError::NoConversation)?;
        if !conversation.is_group {
            return Err(ClientError::NotGroup);
        }
        Ok(conversation)
    }

    fn handle_server(&mut self, event: ServerEvent) -> Vec<ClientAction> {
        match event {
            ServerEvent::NewMessage(message) => self.new_message(message),
            ServerEvent::Typing(typing) => {
                let Some(conversation) = self.conversation.get() else {
                    return vec![];
                };
                if self.typing.observe_typing(conversation, &self.local_user, &typing.sender_id) {
                    vec![self.typing_changed()]
                } else {
                    vec![]
                }
            },
            ServerEvent::StopTyping(typing) => {
                if self.typing.observe_stop(&typing.sender_id) {
                    vec![self.typing_changed()]
                } else {
                    vec![]
                }
            },
            ServerEvent::ChatUpdated(update) => self.chat_updated(update),
            ServerEvent::AdjustStrict(change) => {
                if self.conversation.set_strict(change.is_strict) {
                    vec![ClientAction::StrictChanged { is_strict: change.is_strict }]
                } else {
                    vec![]
                }
            },
            ServerEvent::ChatCreated(conversation) => {
                vec![ClientAction::ConversationCreated(conversation)]
            },
            ServerEvent::Error(message) => {
                // No recovery contract at this layer.
                tracing::error!(%message, "channel error");
                vec![]
            },
        }
    }

    fn new_message(&mut self, message: Message) -> Vec<ClientAction> {
        let mut actions = Vec::new();

        // Notices signal out-of-band state changes (membership, rename)
        // not fully described by their text; refetch the metadata.
        if message.kind == MessageKind::Notice
            && let Some(id) = self.conversation.id()
        {
            actions.push(ClientAction::Api(ApiRequest::FetchConversation {
                conversation_id: id.to_owned(),
            }));
        }

        match self.store.append(message) {
            Appended::Added => actions.push(ClientAction::ScrollToBottom),
            Appended::Duplicate => {},
        }
        actions
    }

    fn chat_updated(&mut self, update: Option<Conversation>) -> Vec<ClientAction> {
        match self.conversation.apply_update(update) {
            ConversationUpdate::Replaced => {
                let mut actions = vec![ClientAction::ConversationReplaced];
                let pruned = self
                    .conversation
                    .get()
                    .is_some_and(|conversation| self.typing.retain_members(conversation));
                if pruned {
                    actions.push(self.typing_changed());
                }
                actions
            },
            ConversationUpdate::Closed => {
                self.typing.clear();
                vec![ClientAction::ConversationGone]
            },
            ConversationUpdate::Ignored => vec![],
        }
    }

    fn handle_api(&mut self, response: ApiResponse) -> Vec<ClientAction> {
        match response {
            ApiResponse::Conversation { conversation_id, conversation } => {
                if self.conversation.id() != Some(conversation_id.as_str()) {
                    tracing::debug!(conversation = %conversation_id, "stale conversation response dropped");
                    return vec![];
                }
                self.chat_updated(conversation)
            },
            ApiResponse::Messages { conversation_id, page, messages, total: _, total_pages } => {
                if self.conversation.id() != Some(conversation_id.as_str()) {
                    tracing::debug!(conversation = %conversation_id, page, "stale page response dropped");
                    return vec![];
                }
                if page <= 1 {
                    self.store.seed(messages);
                    self.paginator.reset(total_pages);
                    vec![ClientAction::ScrollToBottom]
                } else {
                    let prepended = self.store.prepend(messages);
                    self.paginator.complete(page);
                    vec![ClientAction::AnchorViewport { prepended }]
                }
            },
            // User and conversation-list responses belong to the
            // application layer; nothing to reconcile here.
            ApiResponse::User { .. } | ApiResponse::Conversations { .. } => vec![],
            ApiResponse::Failed { request, conversation_id } => {
                if request == FetchKind::Messages
                    && conversation_id.as_deref() == self.conversation.id()
                {
                    self.paginator.fail();
                }
                vec![]
            },
        }
    }

    fn typing_changed(&self) -> ClientAction {
        ClientAction::TypingChanged { users: self.typing.users().cloned().collect() }
    }

    /// The local user this client acts as.
    pub fn local_user(&self) -> &str {
        &self.local_user
    }

    /// Id of the open conversation, if any.
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.id()
    }

    /// Metadata of the open conversation, once fetched.
    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.get()
    }

    /// Message history of the open conversation.
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// Users currently typing, in stable order.
    pub fn typing_users(&self) -> Vec<UserId> {
        self.typing.users().cloned().collect()
    }

    /// Whether the local user may post right now. Re-evaluated on every
    /// call so strictness changes take effect immediately.
    pub fn can_send(&self) -> bool {
        self.conversation.can_send(&self.local_user)
    }

    /// Whether older history pages remain.
    pub fn has_more_history(&self) -> bool {
        self.paginator.has_more()
    }

    /// Whether a history load is in flight.
    pub fn is_loading_history(&self) -> bool {
        self.paginator.is_loading()
    }

    /// Load state of the history cursor.
    pub fn history_load_state(&self) -> banter_core::LoadState {
        self.paginator.state()
    }
}
