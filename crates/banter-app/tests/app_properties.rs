//! Property-based tests for the application layer.
//!
//! Verifies that invariants hold under arbitrary event sequences.

use banter_app::{App, AppEvent, Compose, TypingSignal};
use banter_proto::Conversation;
use proptest::prelude::*;

fn conversation(id: u32) -> Conversation {
    Conversation {
        id: format!("c{id}"),
        owner_id: "u1".into(),
        is_group: id % 2 == 0,
        members: vec!["u1".into(), "u2".into()],
        group_name: (id % 2 == 0).then(|| format!("group {id}")),
        is_strict: false,
    }
}

proptest! {
    /// Compose emits exactly one signal per emptiness flip, whatever the
    /// edit sequence looks like.
    #[test]
    fn prop_compose_signals_match_emptiness_flips(
        edits in prop::collection::vec(".{0,8}", 0..50),
    ) {
        let mut compose = Compose::new();
        let mut was_empty = true;

        for edit in edits {
            let signal = compose.edit(edit.clone());
            let is_empty = edit.is_empty();
            match (was_empty, is_empty) {
                (true, false) => prop_assert_eq!(signal, Some(TypingSignal::Started)),
                (false, true) => prop_assert_eq!(signal, Some(TypingSignal::Stopped)),
                _ => prop_assert_eq!(signal, None),
            }
            was_empty = is_empty;
        }
    }

    /// The conversation list never holds two entries with the same id, no
    /// matter how often the channel re-announces a conversation.
    #[test]
    fn prop_conversation_list_stays_unique(ids in prop::collection::vec(0u32..10, 0..60)) {
        let mut app = App::new("u1".into());

        for id in ids {
            let _ = app.handle(AppEvent::ConversationCreated(conversation(id)));
        }

        let mut seen = std::collections::HashSet::new();
        for c in app.conversations() {
            prop_assert!(seen.insert(c.id.clone()), "duplicate list entry {}", c.id);
        }
    }

    /// Submitting never produces a send action without permission, under
    /// any strictness interleaving.
    #[test]
    fn prop_submit_respects_strictness(toggles in prop::collection::vec(any::<bool>(), 1..20)) {
        let mut app = App::new("u2".into());
        let _ = app.handle(AppEvent::ConversationSelected { conversation_id: "c0".into() });
        let _ = app.handle(AppEvent::ConversationLoaded { conversation: conversation(0) });

        for is_strict in toggles {
            let _ = app.handle(AppEvent::StrictChanged { is_strict });
            let _ = app.handle(AppEvent::ComposeEdited { text: "draft".into() });
            let actions = app.handle(AppEvent::Submit);

            let sent = actions
                .iter()
                .any(|a| matches!(a, banter_app::AppAction::SendMessage { .. }));
            prop_assert_eq!(sent, !is_strict, "strict={} must gate sends", is_strict);
        }
    }
}
