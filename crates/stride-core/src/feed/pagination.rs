/// The cursor and received-count of the most recently completed fetch.
/// Feeds the short-terminal-page guard in [`CursorState::should_fetch_more`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastRequest {
    pub cursor: Option<u64>,
    pub received: usize,
}

/// Parameters captured when a fetch is initiated. The generation is the
/// reset epoch it belongs to; a completion whose generation no longer
/// matches the state's has been superseded and is discarded.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub cursor: Option<u64>,
    pub generation: u64,
}

/// How a fetch ended.
#[derive(Debug, Clone, Copy)]
pub enum PageOutcome {
    Success {
        next_cursor: Option<u64>,
        received: usize,
    },
    Failure,
}

/// Pagination state for one listing session.
///
/// `exhausted` is sticky for the session: once the server reports no more
/// pages (or a fetch fails, fail-closed) nothing but a reset fetches again.
/// The `fetching` flag is the sole mutual exclusion between requests.
#[derive(Debug, Default)]
pub struct CursorState {
    next_cursor: Option<u64>,
    exhausted: bool,
    fetching: bool,
    last_request: Option<LastRequest>,
    generation: u64,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a fetch may start, and if so capture its parameters.
    ///
    /// A continuation (`reset == false`) is refused while another fetch is
    /// in flight or the session is exhausted. A reset always proceeds: it
    /// bumps the generation so that any in-flight continuation completes
    /// into the void, and starts over from a null cursor.
    pub fn begin_request(&mut self, reset: bool) -> Option<PageRequest> {
        if !reset && (self.fetching || self.exhausted) {
            return None;
        }

        if reset {
            self.generation += 1;
            self.exhausted = false;
            self.next_cursor = None;
            self.last_request = None;
        }

        self.fetching = true;
        Some(PageRequest {
            cursor: self.next_cursor,
            generation: self.generation,
        })
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// request belongs to a superseded generation.
    pub fn complete_request(&mut self, request: PageRequest, outcome: PageOutcome) -> bool {
        if request.generation != self.generation {
            return false;
        }

        self.fetching = false;
        match outcome {
            PageOutcome::Success {
                next_cursor,
                received,
            } => {
                self.last_request = Some(LastRequest {
                    cursor: request.cursor,
                    received,
                });
                self.next_cursor = next_cursor;
                self.exhausted = next_cursor.is_none() || received == 0;
            }
            PageOutcome::Failure => {
                // Fail closed: stop auto-retrying until an explicit reload.
                self.exhausted = true;
            }
        }
        true
    }

    /// Gate for the viewport-sentinel signal. The signal can fire several
    /// times per scroll frame, and a short terminal page can arrive before
    /// `exhausted` propagates, so both are guarded here rather than at the
    /// call site.
    pub fn should_fetch_more(&self, page_size: usize) -> bool {
        if self.fetching || self.exhausted {
            return false;
        }
        if let Some(last) = self.last_request {
            if last.cursor == self.next_cursor && last.received < page_size {
                return false;
            }
        }
        true
    }

    /// Terminal state forced locally, e.g. after delete-all.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    pub fn has_more(&self) -> bool {
        !self.exhausted
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn next_cursor(&self) -> Option<u64> {
        self.next_cursor
    }

    pub fn last_request(&self) -> Option<LastRequest> {
        self.last_request
    }
}
