//! Ordered, deduplicated message history for one conversation.
//!
//! Merges paginated fetch results with live-pushed messages: [`seed`] after
//! the initial fetch, [`prepend`] for older pages, [`append`] for channel
//! deliveries. Identity is the server-assigned message id and the store is
//! the only dedup safety net against channel redelivery. Deleted messages
//! stay in the sequence as tombstones so ordering and counts survive
//! deletion; the view suppresses their content.
//!
//! [`seed`]: MessageStore::seed
//! [`prepend`]: MessageStore::prepend
//! [`append`]: MessageStore::append

use std::collections::HashSet;

use banter_proto::{Message, MessageId};

/// Outcome of [`MessageStore::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The message was added at the tail.
    Added,
    /// The message id was already present; the store is unchanged.
    Duplicate,
}

/// Ordered, deduplicated collection of messages for one conversation.
///
/// Ordering follows creation time as delivered by the server: prepended
/// pages sit before everything already present, live appends after, with
/// arrival order preserved within each source.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
    ids: HashSet<MessageId>,
}

impl MessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with the initial fetch result.
    pub fn seed(&mut self, messages: Vec<Message>) {
        self.messages.clear();
        self.ids.clear();
        for message in messages {
            if self.ids.insert(message.id.clone()) {
                self.messages.push(message);
            }
        }
    }

    /// Insert an older page at the head, skipping ids already present.
    /// Returns how many messages were actually inserted.
    pub fn prepend(&mut self, older: Vec<Message>) -> usize {
        let mut fresh = Vec::with_capacity(older.len());
        for message in older {
            if self.ids.insert(message.id.clone()) {
                fresh.push(message);
            }
        }
        let inserted = fresh.len();
        self.messages.splice(0..0, fresh);
        inserted
    }

    /// Insert a live-pushed message at the tail, unless its id is already
    /// present (the channel may redeliver).
    pub fn append(&mut self, message: Message) -> Appended {
        if !self.ids.insert(message.id.clone()) {
            return Appended::Duplicate;
        }
        self.messages.push(message);
        Appended::Added
    }

    /// Whether a message id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Messages in display order. Tombstones are included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of stored messages, tombstones included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop everything, e.g. when the conversation is closed.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use banter_proto::MessageKind;
    use chrono::{DateTime, Utc};

    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn message(id: &str, at: i64) -> Message {
        Message {
            id: id.into(),
            sender_id: "u1".into(),
            content: format!("msg {id}"),
            kind: MessageKind::Normal,
            created_at: ts(at),
            deleted_at: None,
        }
    }

    fn ids(store: &MessageStore) -> Vec<&str> {
        store.messages().iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn append_is_idempotent_per_id() {
        let mut store = MessageStore::new();
        assert_eq!(store.append(message("m1", 10)), Appended::Added);
        assert_eq!(store.append(message("m1", 10)), Appended::Duplicate);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn prepend_keeps_relative_order() {
        let mut store = MessageStore::new();
        store.seed(vec![message("m3", 30), message("m4", 40)]);

        let inserted = store.prepend(vec![message("m1", 10), message("m2", 20)]);
        assert_eq!(inserted, 2);

        assert_eq!(store.append(message("m5", 50)), Appended::Added);
        assert_eq!(ids(&store), ["m1", "m2", "m3", "m4", "m5"]);
    }

    #[test]
    fn prepend_skips_already_known_ids() {
        let mut store = MessageStore::new();
        store.seed(vec![message("m2", 20), message("m3", 30)]);

        let inserted = store.prepend(vec![message("m1", 10), message("m2", 20)]);
        assert_eq!(inserted, 1);
        assert_eq!(ids(&store), ["m1", "m2", "m3"]);
    }

    #[test]
    fn seed_replaces_previous_contents() {
        let mut store = MessageStore::new();
        store.seed(vec![message("m1", 10)]);
        store.seed(vec![message("m2", 20), message("m3", 30)]);
        assert_eq!(ids(&store), ["m2", "m3"]);
        assert!(!store.contains("m1"));
    }

    #[test]
    fn tombstones_stay_in_sequence() {
        let mut store = MessageStore::new();
        let mut deleted = message("m2", 20);
        deleted.deleted_at = Some(ts(25));

        store.seed(vec![message("m1", 10), deleted, message("m3", 30)]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.messages()[1].visible_content(), None);
        assert_eq!(ids(&store), ["m1", "m2", "m3"]);
    }
}
