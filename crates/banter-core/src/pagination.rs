//! Backward pagination cursor for message history.
//!
//! Pages count backward from the newest: page 1 holds the most recent
//! messages and "load older" fetches `page + 1`. At most one load may be
//! in flight; rapid scroll events coalesce into that single load. A failed
//! fetch parks the cursor in [`LoadState::Failed`] without advancing, so
//! failure stays distinguishable from exhaustion and a later scroll may
//! retry. Once the last page has loaded, further loads are suppressed for
//! the rest of the conversation-open session.

/// Load state of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load in flight.
    #[default]
    Idle,

    /// A page fetch is in flight.
    Loading,

    /// The last page fetch failed; the cursor did not advance.
    Failed,
}

/// Pagination cursor for one conversation-open session.
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    /// Oldest page loaded so far (1-based). Zero until the seed arrives.
    page: u32,
    total_pages: u32,
    state: LoadState,
}

impl Paginator {
    /// Create a cursor with nothing loaded. [`has_more`] stays false until
    /// [`reset`] records the seed fetch.
    ///
    /// [`has_more`]: Paginator::has_more
    /// [`reset`]: Paginator::reset
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the seed fetch: page 1 is loaded, `total_pages` known.
    pub fn reset(&mut self, total_pages: u32) {
        self.page = 1;
        self.total_pages = total_pages;
        self.state = LoadState::Idle;
    }

    /// Oldest page loaded so far.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total page count reported by the server.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether older pages remain.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Try to start a backward load. Returns the page to fetch, or `None`
    /// when history is exhausted or a load is already in flight.
    pub fn begin_load(&mut self) -> Option<u32> {
        if self.state == LoadState::Loading || !self.has_more() {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.page + 1)
    }

    /// Record a successfully loaded page and return to idle.
    pub fn complete(&mut self, page: u32) {
        self.page = self.page.max(page);
        self.state = LoadState::Idle;
    }

    /// Record a failed load. The cursor does not advance; the next
    /// [`begin_load`] may retry the same page.
    ///
    /// [`begin_load`]: Paginator::begin_load
    pub fn fail(&mut self) {
        self.state = LoadState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausts_after_last_page() {
        let mut paginator = Paginator::new();
        paginator.reset(3);

        assert_eq!(paginator.begin_load(), Some(2));
        paginator.complete(2);
        assert_eq!(paginator.begin_load(), Some(3));
        paginator.complete(3);

        assert!(!paginator.has_more());
        assert_eq!(paginator.begin_load(), None);
    }

    #[test]
    fn single_load_in_flight() {
        let mut paginator = Paginator::new();
        paginator.reset(5);

        assert_eq!(paginator.begin_load(), Some(2));
        // A second scroll-to-top while loading must not start another fetch.
        assert_eq!(paginator.begin_load(), None);

        paginator.complete(2);
        assert_eq!(paginator.begin_load(), Some(3));
    }

    #[test]
    fn failure_is_retryable_and_distinct_from_exhaustion() {
        let mut paginator = Paginator::new();
        paginator.reset(2);

        assert_eq!(paginator.begin_load(), Some(2));
        paginator.fail();

        assert_eq!(paginator.state(), LoadState::Failed);
        assert!(paginator.has_more());
        assert_eq!(paginator.begin_load(), Some(2));
    }

    #[test]
    fn nothing_to_load_before_seed() {
        let mut paginator = Paginator::new();
        assert!(!paginator.has_more());
        assert_eq!(paginator.begin_load(), None);
    }

    #[test]
    fn single_page_history_never_loads() {
        let mut paginator = Paginator::new();
        paginator.reset(1);
        assert!(!paginator.has_more());
        assert_eq!(paginator.begin_load(), None);
    }
}
