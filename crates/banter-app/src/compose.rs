//! Compose field with typing-signal emission.
//!
//! Every edit that flips the field between empty and non-empty emits a
//! signal, with no debounce: the requirement is one event per emptiness
//! transition, and emptiness counts characters, not trimmed content.

/// Signal produced by a compose edit that flipped emptiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingSignal {
    /// The field became non-empty; the local user started typing.
    Started,
    /// The field became empty; the local user stopped typing.
    Stopped,
}

/// Compose buffer for the active conversation.
#[derive(Debug, Clone, Default)]
pub struct Compose {
    text: String,
}

impl Compose {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer contents. Returns a signal iff the edit flipped
    /// the field between empty and non-empty.
    pub fn edit(&mut self, text: String) -> Option<TypingSignal> {
        let was_empty = self.text.is_empty();
        let is_empty = text.is_empty();
        self.text = text;
        match (was_empty, is_empty) {
            (true, false) => Some(TypingSignal::Started),
            (false, true) => Some(TypingSignal::Stopped),
            _ => None,
        }
    }

    /// Clear the buffer and return the trimmed content for submission.
    ///
    /// Emits no signal: the send path emits its own stop-typing, so a
    /// second one here would be redundant on the wire.
    pub fn take(&mut self) -> String {
        let content = std::mem::take(&mut self.text);
        content.trim().to_owned()
    }

    /// Current contents.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_on_each_emptiness_flip() {
        let mut compose = Compose::new();
        assert_eq!(compose.edit("h".into()), Some(TypingSignal::Started));
        assert_eq!(compose.edit("hi".into()), None);
        assert_eq!(compose.edit(String::new()), Some(TypingSignal::Stopped));
        assert_eq!(compose.edit("x".into()), Some(TypingSignal::Started));
    }

    #[test]
    fn whitespace_counts_as_typing() {
        let mut compose = Compose::new();
        assert_eq!(compose.edit(" ".into()), Some(TypingSignal::Started));
        assert_eq!(compose.edit(String::new()), Some(TypingSignal::Stopped));
    }

    #[test]
    fn take_trims_and_clears_silently() {
        let mut compose = Compose::new();
        let _ = compose.edit("  hi there ".into());
        assert_eq!(compose.take(), "hi there");
        assert!(compose.is_empty());
        // The next keystroke is a fresh start.
        assert_eq!(compose.edit("m".into()), Some(TypingSignal::Started));
    }
}
