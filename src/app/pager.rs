//! Pagination state machine for incremental page fetching.
//!
//! This module implements the controller that decides when the next page of
//! posts may be requested. It is deliberately UI-agnostic: the frontend turns
//! "the last rendered item became visible" into a load-more event, and this
//! type answers whether that event should become a fetch.
//!
//! # State Machine
//!
//! ```text
//!            try_begin() -> Some(page)
//!   ┌──────┐ ─────────────────────────► ┌───────────────┐
//!   │ Idle │                            │ FetchInFlight │
//!   └──────┘ ◄───────────────────────── └───────────────┘
//!            complete()                  try_begin() -> None
//! ```
//!
//! Only one fetch may be in flight at a time; re-entrant triggers while a
//! fetch is pending are ignored. Completion re-arms the controller
//! unconditionally, whether the fetch succeeded, failed, or came back empty.
//!
//! An empty page is not treated as a permanent end-of-data signal: the
//! controller keeps accepting triggers afterwards. That mirrors the upstream
//! behavior this application reimplements; an empty append is a no-op, so the
//! cost is a redundant request, not a correctness hazard.

/// Fetch states of the pagination controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// No fetch pending; the next trigger will start one.
    Idle,
    /// A page fetch has been issued and has not completed yet.
    FetchInFlight,
}

/// Pagination controller tracking the page cursor and the in-flight flag.
///
/// The page counter is monotonically increasing and starts at 1, the initial
/// page. The in-flight flag is advisory state for the single-threaded event
/// loop, not a lock: it is set when a fetch is issued and cleared once the
/// corresponding response (success, empty, or error) arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// Last page number handed out for fetching.
    page: u32,
    /// Current fetch state.
    state: FetchState,
}

impl Pager {
    /// Creates a controller at page 1 with no fetch in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            state: FetchState::Idle,
        }
    }

    /// Claims the in-flight slot for the initial page without advancing the cursor.
    ///
    /// Called exactly once at startup before the first page fetch is posted to
    /// the worker. Returns the page to fetch (always 1), or `None` if a fetch
    /// is somehow already pending.
    pub fn begin_initial(&mut self) -> Option<u32> {
        if self.state == FetchState::FetchInFlight {
            return None;
        }
        self.state = FetchState::FetchInFlight;
        Some(self.page)
    }

    /// Attempts to start the next page fetch.
    ///
    /// From `Idle` this advances the page cursor, enters `FetchInFlight`, and
    /// returns the page number to fetch. From `FetchInFlight` it returns
    /// `None`: the trigger is dropped, not queued.
    pub fn try_begin(&mut self) -> Option<u32> {
        match self.state {
            FetchState::FetchInFlight => {
                tracing::debug!(page = self.page, "load-more ignored, fetch in flight");
                None
            }
            FetchState::Idle => {
                self.page += 1;
                self.state = FetchState::FetchInFlight;
                tracing::debug!(page = self.page, "starting page fetch");
                Some(self.page)
            }
        }
    }

    /// Returns the controller to `Idle`.
    ///
    /// Called when a page fetch completes, regardless of outcome. Idempotent:
    /// completing while already idle is a no-op.
    pub fn complete(&mut self) {
        self.state = FetchState::Idle;
    }

    /// Current fetch state.
    #[must_use]
    pub const fn state(&self) -> FetchState {
        self.state
    }

    /// Page number of the most recently issued fetch.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_fetch_claims_page_one() {
        let mut pager = Pager::new();
        assert_eq!(pager.begin_initial(), Some(1));
        assert_eq!(pager.state(), FetchState::FetchInFlight);
        // The initial claim does not advance the cursor.
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn rapid_triggers_issue_exactly_one_fetch() {
        let mut pager = Pager::new();
        assert_eq!(pager.try_begin(), Some(2));
        assert_eq!(pager.try_begin(), None);
        assert_eq!(pager.try_begin(), None);
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn completion_rearms_the_controller() {
        let mut pager = Pager::new();
        assert_eq!(pager.try_begin(), Some(2));
        pager.complete();
        assert_eq!(pager.try_begin(), Some(3));
    }

    #[test]
    fn page_counter_is_monotonic_across_many_cycles() {
        let mut pager = Pager::new();
        for expected in 2..=10 {
            assert_eq!(pager.try_begin(), Some(expected));
            pager.complete();
        }
    }

    #[test]
    fn empty_page_is_not_terminal() {
        // Documents preserved upstream behavior: after an empty page the
        // controller still accepts triggers. The append is a no-op upstream,
        // so the extra request is a latent inefficiency, not a bug here.
        let mut pager = Pager::new();
        assert_eq!(pager.try_begin(), Some(2));
        pager.complete(); // remote returned an empty array
        assert_eq!(pager.try_begin(), Some(3));
    }

    #[test]
    fn complete_while_idle_is_a_noop() {
        let mut pager = Pager::new();
        pager.complete();
        assert_eq!(pager.state(), FetchState::Idle);
        assert_eq!(pager.try_begin(), Some(2));
    }
}
