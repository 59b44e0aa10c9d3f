use std::time::Duration;

/// Quiet period after the last keystroke before a search takes effect.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Listing-page query state: draft text, debounced effective text and page.
///
/// Every keystroke bumps a generation and returns it. The caller waits
/// [`SEARCH_DEBOUNCE`] and then calls [`SearchState::settle`] with that
/// generation; only the latest generation applies, so a burst of keystrokes
/// produces one effective search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    draft: String,
    effective: String,
    page: usize,
    generation: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            draft: String::new(),
            effective: String::new(),
            page: 1,
            generation: 0,
        }
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Search text the listing query should use.
    pub fn effective(&self) -> &str {
        &self.effective
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Record a keystroke. Returns the generation to settle after the debounce.
    ///
    /// Page and effective text stay put until the draft settles.
    pub fn input(&mut self, text: impl Into<String>) -> u64 {
        self.draft = text.into();
        self.generation += 1;
        self.generation
    }

    /// Apply the draft if `generation` is still the latest keystroke.
    ///
    /// Returns the new effective text when it changed.
    pub fn settle(&mut self, generation: u64) -> Option<&str> {
        if generation != self.generation {
            return None;
        }
        self.apply()
    }

    /// Explicit submit (Enter or the search button): apply immediately and
    /// invalidate pending timers.
    pub fn submit(&mut self) -> Option<&str> {
        self.generation += 1;
        self.page = 1;
        self.apply()
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    fn apply(&mut self) -> Option<&str> {
        if self.effective == self.draft {
            return None;
        }
        self.effective = self.draft.clone();
        self.page = 1;
        Some(&self.effective)
    }
}

/// Issues monotonically increasing tickets for a view's requests so that a
/// response arriving after a newer request was issued can be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}
