//! Engine-to-application translation layer.
//!
//! The [`Bridge`] wraps the low-level [`banter_client::Client`] and adapts
//! it to the application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`]s into client events.
//! - Accumulates outgoing [`ClientIntent`]s and [`ApiRequest`]s for the
//!   driver to execute in the next I/O cycle.
//! - Interprets client actions and converts them back into
//!   [`crate::AppEvent`]s to update the UI.

use banter_client::{ApiRequest, ApiResponse, Client, ClientAction, ClientEvent, FetchKind};
use banter_proto::{ClientIntent, ServerEvent, UserId};

use crate::{AppAction, AppEvent};

/// Bridge between App and Client engine logic.
pub struct Bridge {
    client: Client,
    outgoing: Vec<ClientIntent>,
    requests: Vec<ApiRequest>,
}

impl Bridge {
    /// Create a new Bridge acting as the given local user.
    pub fn new(local_user: UserId) -> Self {
        Self { client: Client::new(local_user), outgoing: Vec::new(), requests: Vec::new() }
    }

    /// The wrapped engine, for read-only queries.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        let event = match action {
            AppAction::Register => ClientEvent::Register,
            AppAction::Open { conversation_id } => ClientEvent::Open { conversation_id },
            AppAction::Close => ClientEvent::Close,
            AppAction::NotifyTyping { typing } => ClientEvent::ComposeTyping { typing },
            AppAction::SendMessage { content } => ClientEvent::Send { content },
            AppAction::SendAttachment { attachment } => {
                ClientEvent::SendAttachment { attachment }
            },
            AppAction::LoadOlder => ClientEvent::LoadOlder,
            AppAction::Rename { name } => ClientEvent::Rename { name },
            AppAction::ToggleStrict => ClientEvent::SetStrict,
            AppAction::AddMember { member_id } => ClientEvent::AddMember { member_id },
            AppAction::RemoveMember { member_id } => ClientEvent::RemoveMember { member_id },
            AppAction::LeaveGroup => ClientEvent::Leave,
            AppAction::DeleteConversation => ClientEvent::Delete,
            AppAction::RemoveContact => ClientEvent::RemoveContact,
            AppAction::ResolveUser { user_id } => {
                self.requests.push(ApiRequest::FetchUser { user_id });
                return vec![];
            },
            // View effects are executed by the runtime, not the engine.
            AppAction::Render | AppAction::ScrollToBottom | AppAction::SetScroll { .. } => {
                return vec![];
            },
        };
        self.dispatch(event)
    }

    /// Handle an inbound event from the channel.
    pub fn handle_server_event(&mut self, event: ServerEvent) -> Vec<AppEvent> {
        self.dispatch(ClientEvent::Server(event))
    }

    /// Handle the result of a REST request.
    pub fn handle_api_response(&mut self, response: ApiResponse) -> Vec<AppEvent> {
        match response {
            // Directory and list data feed the App directly.
            ApiResponse::User { user } => vec![AppEvent::UserResolved { user }],
            ApiResponse::Conversations { conversations } => {
                vec![AppEvent::ConversationsLoaded { conversations }]
            },
            ApiResponse::Failed { request: FetchKind::Upload, .. } => {
                vec![AppEvent::Error { message: "Upload failed. Please try again.".into() }]
            },
            other => self.dispatch(ClientEvent::Api(other)),
        }
    }

    /// Take pending outgoing intents.
    pub fn take_outgoing(&mut self) -> Vec<ClientIntent> {
        std::mem::take(&mut self.outgoing)
    }

    /// Take pending REST requests.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.requests)
    }

    fn dispatch(&mut self, event: ClientEvent) -> Vec<AppEvent> {
        match self.client.handle(event) {
            Ok(actions) => actions.into_iter().filter_map(|a| self.map_action(a)).collect(),
            Err(e) => {
                tracing::debug!(error = %e, "engine rejected event");
                vec![AppEvent::Error { message: e.to_string() }]
            },
        }
    }

    fn map_action(&mut self, action: ClientAction) -> Option<AppEvent> {
        match action {
            ClientAction::Emit(intent) => {
                self.outgoing.push(intent);
                None
            },
            ClientAction::Api(request) => {
                self.requests.push(request);
                None
            },
            ClientAction::ScrollToBottom => Some(AppEvent::MessagesArrived),
            ClientAction::AnchorViewport { prepended } => {
                Some(AppEvent::HistoryPrepended { prepended })
            },
            ClientAction::ConversationReplaced => {
                self.client
                    .conversation()
                    .cloned()
                    .map(|conversation| AppEvent::ConversationLoaded { conversation })
            },
            ClientAction::ConversationGone => Some(AppEvent::ConversationGone),
            ClientAction::TypingChanged { users } => Some(AppEvent::TypingChanged { users }),
            ClientAction::StrictChanged { is_strict } => {
                Some(AppEvent::StrictChanged { is_strict })
            },
            ClientAction::ConversationCreated(conversation) => {
                Some(AppEvent::ConversationCreated(conversation))
            },
        }
    }
}
