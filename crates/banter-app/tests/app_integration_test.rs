//! Integration tests for App and Bridge behavior.
//!
//! Tests drive the App state machine through the Bridge exactly the way
//! the runtime does, with scripted channel events and REST responses, and
//! end with oracle checks on the visible state: compose contents, typing
//! indicator, conversation list, outgoing intents.

use banter_app::{App, AppAction, AppEvent, Bridge};
use banter_client::ApiResponse;
use banter_proto::{
    ClientIntent, Conversation, Message, MessageKind, ServerEvent, StrictChange, TypingEvent,
    User,
};
use chrono::DateTime;

fn conversation(id: &str, owner: &str, members: &[&str], is_group: bool) -> Conversation {
    Conversation {
        id: id.into(),
        owner_id: owner.into(),
        is_group,
        members: members.iter().map(|m| (*m).to_string()).collect(),
        group_name: is_group.then(|| "team".to_string()),
        is_strict: false,
    }
}

fn message(id: &str, sender: &str, content: &str) -> Message {
    Message {
        id: id.into(),
        sender_id: sender.into(),
        content: content.into(),
        kind: MessageKind::Normal,
        created_at: DateTime::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// Process actions from App through Bridge and update App state, the way
/// the runtime drains its queue.
fn process_actions(app: &mut App, bridge: &mut Bridge, actions: Vec<AppAction>) {
    let mut pending = actions;
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            match action {
                AppAction::Render | AppAction::ScrollToBottom | AppAction::SetScroll { .. } => {},
                other => {
                    for event in bridge.process_app_action(other) {
                        pending.extend(app.handle(event));
                    }
                },
            }
        }
    }
}

fn drive(app: &mut App, bridge: &mut Bridge, event: AppEvent) {
    let actions = app.handle(event);
    process_actions(app, bridge, actions);
}

fn receive(app: &mut App, bridge: &mut Bridge, event: ServerEvent) {
    let events = bridge.handle_server_event(event);
    for event in events {
        let actions = app.handle(event);
        process_actions(app, bridge, actions);
    }
}

fn respond(app: &mut App, bridge: &mut Bridge, response: ApiResponse) {
    let events = bridge.handle_api_response(response);
    for event in events {
        let actions = app.handle(event);
        process_actions(app, bridge, actions);
    }
}

/// App with conversation `c` opened and its metadata loaded.
fn opened(local: &str, c: Conversation) -> (App, Bridge) {
    let mut app = App::new(local.into());
    let mut bridge = Bridge::new(local.into());
    let id = c.id.clone();

    drive(&mut app, &mut bridge, AppEvent::ConversationSelected { conversation_id: id.clone() });
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::Conversation { conversation_id: id.clone(), conversation: Some(c) },
    );
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::Messages {
            conversation_id: id,
            page: 1,
            messages: vec![message("m1", "u1", "welcome")],
            total: 1,
            total_pages: 1,
        },
    );
    let _ = bridge.take_outgoing();
    let _ = bridge.take_requests();
    (app, bridge)
}

#[test]
fn member_sends_and_strict_mode_locks_them_out() {
    // Conversation C1, strict = false, owner = U1. U2 is a member.
    let (mut app, mut bridge) = opened("u2", conversation("c1", "u1", &["u1", "u2"], true));

    // U2 types and submits "hi".
    drive(&mut app, &mut bridge, AppEvent::ComposeEdited { text: "hi".into() });
    drive(&mut app, &mut bridge, AppEvent::Submit);

    let outgoing = bridge.take_outgoing();
    let send = outgoing.iter().find_map(|intent| match intent {
        ClientIntent::SendMessage(send) => Some(send),
        _ => None,
    });
    let send = send.expect("sendMessage intent emitted");
    assert_eq!(send.chat_id, "c1");
    assert_eq!(send.sender_id, "u2");
    assert_eq!(send.content, "hi");

    // The compose field was cleared by the submit.
    assert_eq!(app.compose_text(), "");

    // Strict mode toggles on: U2 sees send disabled, submits are no-ops.
    receive(
        &mut app,
        &mut bridge,
        ServerEvent::AdjustStrict(StrictChange { is_strict: true }),
    );
    assert!(!app.can_send());
    drive(&mut app, &mut bridge, AppEvent::ComposeEdited { text: "hello?".into() });
    drive(&mut app, &mut bridge, AppEvent::Submit);
    assert!(bridge.take_outgoing().is_empty());

    // The owner, on their own client, still can send.
    let mut strict = conversation("c1", "u1", &["u1", "u2"], true);
    strict.is_strict = true;
    let (mut owner_app, mut owner_bridge) = opened("u1", strict);
    assert!(owner_app.can_send());
    drive(&mut owner_app, &mut owner_bridge, AppEvent::ComposeEdited { text: "mine".into() });
    drive(&mut owner_app, &mut owner_bridge, AppEvent::Submit);
    assert!(
        owner_bridge
            .take_outgoing()
            .iter()
            .any(|intent| matches!(intent, ClientIntent::SendMessage(_)))
    );
}

#[test]
fn compose_edits_emit_typing_edges_over_the_channel() {
    let (mut app, mut bridge) = opened("u2", conversation("c1", "u1", &["u1", "u2"], true));

    drive(&mut app, &mut bridge, AppEvent::ComposeEdited { text: "h".into() });
    drive(&mut app, &mut bridge, AppEvent::ComposeEdited { text: "he".into() });
    drive(&mut app, &mut bridge, AppEvent::ComposeEdited { text: String::new() });

    let outgoing = bridge.take_outgoing();
    let edges: Vec<&ClientIntent> = outgoing
        .iter()
        .filter(|i| matches!(i, ClientIntent::Typing(_) | ClientIntent::StopTyping(_)))
        .collect();
    // One event per emptiness flip: started once, stopped once.
    assert_eq!(edges.len(), 2);
    assert!(matches!(edges[0], ClientIntent::Typing(_)));
    assert!(matches!(edges[1], ClientIntent::StopTyping(_)));
}

#[test]
fn typing_indicator_renders_names_then_generic_text() {
    let (mut app, mut bridge) =
        opened("u1", conversation("c1", "u1", &["u1", "u2", "u3"], true));
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::User {
            user: User { id: "u2".into(), name: "Ada".into(), email: "ada@example.com".into() },
        },
    );

    receive(&mut app, &mut bridge, ServerEvent::Typing(TypingEvent { sender_id: "u2".into() }));
    assert_eq!(app.typing_indicator().as_deref(), Some("Ada is typing..."));

    receive(&mut app, &mut bridge, ServerEvent::Typing(TypingEvent { sender_id: "u3".into() }));
    assert_eq!(app.typing_indicator().as_deref(), Some("Multiple people are typing..."));

    receive(
        &mut app,
        &mut bridge,
        ServerEvent::StopTyping(TypingEvent { sender_id: "u2".into() }),
    );
    receive(
        &mut app,
        &mut bridge,
        ServerEvent::StopTyping(TypingEvent { sender_id: "u3".into() }),
    );
    assert_eq!(app.typing_indicator(), None);
}

#[test]
fn conversation_list_deduplicates_created_events() {
    let mut app = App::new("u1".into());
    let mut bridge = Bridge::new("u1".into());

    drive(&mut app, &mut bridge, AppEvent::Started);
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::Conversations {
            conversations: vec![conversation("c1", "u1", &["u1", "u2"], false)],
        },
    );
    assert_eq!(app.conversations().len(), 1);

    // The channel announces a group we already know about and a new one.
    receive(
        &mut app,
        &mut bridge,
        ServerEvent::ChatCreated(conversation("c1", "u1", &["u1", "u2"], false)),
    );
    receive(
        &mut app,
        &mut bridge,
        ServerEvent::ChatCreated(conversation("c2", "u2", &["u1", "u2", "u3"], true)),
    );

    assert_eq!(app.conversations().len(), 2);
    assert_eq!(app.group_conversations().count(), 1);
    assert_eq!(app.direct_conversations().count(), 1);
}

#[test]
fn startup_subscribes_and_loads_the_list() {
    let mut app = App::new("u1".into());
    let mut bridge = Bridge::new("u1".into());

    drive(&mut app, &mut bridge, AppEvent::Started);

    let outgoing = bridge.take_outgoing();
    assert!(matches!(
        outgoing.as_slice(),
        [ClientIntent::SubscribeToUser(user)] if user == "u1"
    ));
    assert_eq!(bridge.take_requests().len(), 1);
}

#[test]
fn notice_arrival_refetches_metadata_and_updates_the_view() {
    let (mut app, mut bridge) = opened("u2", conversation("c1", "u1", &["u1", "u2"], true));

    let mut notice = message("m2", "u1", "u3 was added to the group");
    notice.kind = MessageKind::Notice;
    receive(&mut app, &mut bridge, ServerEvent::NewMessage(notice));

    // The engine asked for fresh metadata; serve it with a new member.
    let requests = bridge.take_requests();
    assert!(!requests.is_empty());
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::Conversation {
            conversation_id: "c1".into(),
            conversation: Some(conversation("c1", "u1", &["u1", "u2", "u3"], true)),
        },
    );

    assert!(app.active_conversation().is_some_and(|c| c.members.len() == 3));
}

#[test]
fn deleted_conversation_clears_the_active_view() {
    let (mut app, mut bridge) = opened("u2", conversation("c1", "u1", &["u1", "u2"], true));
    receive(&mut app, &mut bridge, ServerEvent::ChatUpdated(None));

    assert!(app.active_conversation().is_none());
    assert_eq!(app.typing_indicator(), None);
    assert!(!app.can_send());
}

#[test]
fn upload_failure_surfaces_a_status_notice() {
    use banter_client::FetchKind;

    let (mut app, mut bridge) = opened("u2", conversation("c1", "u1", &["u1", "u2"], true));
    respond(
        &mut app,
        &mut bridge,
        ApiResponse::Failed { request: FetchKind::Upload, conversation_id: Some("c1".into()) },
    );
    assert!(app.status_message().is_some());
}
