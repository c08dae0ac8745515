//! Presence tracking: who is typing in the open conversation.
//!
//! Entries leave the set only on an explicit stop-typing event or when the
//! member leaves the conversation; there is no client-side expiry timer.
//! Direct conversations honor only the current counterpart, and an honored
//! event replaces the whole set, clearing anything left behind by a prior
//! counterpart. Groups accumulate every distinct typing member.

use std::collections::BTreeSet;

use banter_proto::{Conversation, UserId};

/// Typing members of the open conversation.
#[derive(Debug, Clone, Default)]
pub struct TypingTracker {
    typing: BTreeSet<UserId>,
}

impl TypingTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a typing event. Returns whether the set changed.
    ///
    /// The local user's own events are ignored. For a direct conversation
    /// only the single other member is honored and the set is replaced;
    /// for a group the sender is added alongside existing entries.
    pub fn observe_typing(
        &mut self,
        conversation: &Conversation,
        local_user: &str,
        sender: &str,
    ) -> bool {
        if sender == local_user {
            return false;
        }
        if conversation.is_group {
            return self.typing.insert(sender.to_owned());
        }
        match conversation.other_member(local_user) {
            Some(other) if other == sender => {
                if self.typing.len() == 1 && self.typing.contains(sender) {
                    return false;
                }
                self.typing.clear();
                self.typing.insert(sender.to_owned());
                true
            },
            _ => false,
        }
    }

    /// Record a stop-typing event. Returns whether the set changed.
    pub fn observe_stop(&mut self, sender: &str) -> bool {
        self.typing.remove(sender)
    }

    /// Drop entries for users no longer in the conversation, e.g. after a
    /// membership change. Returns whether the set changed.
    pub fn retain_members(&mut self, conversation: &Conversation) -> bool {
        let before = self.typing.len();
        self.typing.retain(|user| conversation.is_member(user));
        self.typing.len() != before
    }

    /// Currently typing users, in stable order.
    pub fn users(&self) -> impl Iterator<Item = &UserId> {
        self.typing.iter()
    }

    /// Number of typing users.
    pub fn len(&self) -> usize {
        self.typing.len()
    }

    /// Whether nobody is typing.
    pub fn is_empty(&self) -> bool {
        self.typing.is_empty()
    }

    /// Forget everything, e.g. when the conversation is closed.
    pub fn clear(&mut self) {
        self.typing.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(is_group: bool, members: &[&str]) -> Conversation {
        Conversation {
            id: "c1".into(),
            owner_id: members.first().map_or_else(String::new, |m| (*m).to_string()),
            is_group,
            members: members.iter().map(|m| (*m).to_string()).collect(),
            group_name: is_group.then(|| "team".to_string()),
            is_strict: false,
        }
    }

    fn users(tracker: &TypingTracker) -> Vec<&str> {
        tracker.users().map(String::as_str).collect()
    }

    #[test]
    fn group_accumulates_distinct_members() {
        let group = conversation(true, &["u1", "u2", "u3"]);
        let mut tracker = TypingTracker::new();

        assert!(tracker.observe_typing(&group, "u1", "u2"));
        assert!(tracker.observe_typing(&group, "u1", "u3"));
        assert!(!tracker.observe_typing(&group, "u1", "u2"));
        assert_eq!(users(&tracker), ["u2", "u3"]);

        assert!(tracker.observe_stop("u2"));
        assert_eq!(users(&tracker), ["u3"]);
    }

    #[test]
    fn own_events_are_ignored() {
        let group = conversation(true, &["u1", "u2"]);
        let mut tracker = TypingTracker::new();
        assert!(!tracker.observe_typing(&group, "u1", "u1"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn direct_honors_only_the_counterpart() {
        let direct = conversation(false, &["u1", "u2"]);
        let mut tracker = TypingTracker::new();

        assert!(tracker.observe_typing(&direct, "u1", "u2"));
        assert_eq!(users(&tracker), ["u2"]);

        // A sender outside the conversation is not honored.
        assert!(!tracker.observe_typing(&direct, "u1", "u9"));
        assert_eq!(users(&tracker), ["u2"]);
    }

    #[test]
    fn direct_replacement_clears_stale_counterpart() {
        let mut tracker = TypingTracker::new();

        let before = conversation(false, &["u1", "u2"]);
        assert!(tracker.observe_typing(&before, "u1", "u2"));

        // The counterpart changed; an event from the new one replaces the
        // stale entry instead of joining it.
        let after = conversation(false, &["u1", "u3"]);
        assert!(tracker.observe_typing(&after, "u1", "u3"));
        assert_eq!(users(&tracker), ["u3"]);
    }

    #[test]
    fn retain_members_prunes_departed_users() {
        let group = conversation(true, &["u1", "u2", "u3"]);
        let mut tracker = TypingTracker::new();
        tracker.observe_typing(&group, "u1", "u2");
        tracker.observe_typing(&group, "u1", "u3");

        let shrunk = conversation(true, &["u1", "u3"]);
        assert!(tracker.retain_members(&shrunk));
        assert_eq!(users(&tracker), ["u3"]);
        assert!(!tracker.retain_members(&shrunk));
    }
}
