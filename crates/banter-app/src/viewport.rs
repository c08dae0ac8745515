//! Scroll viewport tracking for the message history.
//!
//! The anchor across a prepend is computed from the content-height delta,
//! not from message count: messages render at variable height, so only
//! the height difference keeps the scrollbar visually stationary while
//! older content is injected above.

/// Scroll state of the message area.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    /// Distance from the top of the content, in pixels.
    offset: f64,
    /// Total content height, in pixels.
    content_height: f64,
    /// Height recorded when a prepend began, pending restoration.
    anchor_height: Option<f64>,
}

impl Viewport {
    /// Create a viewport at the top of empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest scroll position and content height.
    pub fn record(&mut self, offset: f64, content_height: f64) {
        self.offset = offset;
        self.content_height = content_height;
    }

    /// Whether the view sits at the top of the loaded history, where a
    /// backward load may be triggered.
    pub fn at_top(&self) -> bool {
        self.offset <= 0.0
    }

    /// Remember the current height before older history is injected.
    pub fn begin_anchor(&mut self) {
        self.anchor_height = Some(self.content_height);
    }

    /// Complete a pending anchor: given the post-prepend content height,
    /// return the offset that keeps the previously visible content in
    /// place. `None` when no anchor is pending.
    pub fn apply_prepend(&mut self, new_height: f64) -> Option<f64> {
        let old_height = self.anchor_height.take()?;
        self.offset = new_height - old_height;
        self.content_height = new_height;
        Some(self.offset)
    }

    /// Current scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Current content height.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_restores_position_from_height_delta() {
        let mut viewport = Viewport::new();
        viewport.record(0.0, 600.0);

        viewport.begin_anchor();
        // Twenty older messages of arbitrary rendered height arrive above.
        let offset = viewport.apply_prepend(1450.0);
        assert_eq!(offset, Some(850.0));
        assert!(!viewport.at_top());
    }

    #[test]
    fn apply_without_anchor_is_inert() {
        let mut viewport = Viewport::new();
        viewport.record(120.0, 600.0);
        assert_eq!(viewport.apply_prepend(900.0), None);
        assert_eq!(viewport.offset(), 120.0);
    }

    #[test]
    fn at_top_gates_on_zero_offset() {
        let mut viewport = Viewport::new();
        viewport.record(0.0, 600.0);
        assert!(viewport.at_top());
        viewport.record(35.0, 600.0);
        assert!(!viewport.at_top());
    }
}
