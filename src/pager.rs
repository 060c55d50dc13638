//! Result pagination state machine
//!
//! Models browsing through ranked results as explicit states and
//! transitions, independent of any chat or UI layer. A pager is either
//! showing one result index or has expired; `Prev`/`Next` wrap around the
//! result set and `Timeout` retires the pager for good. The embedding
//! application maps its own button or key events onto [`PagerEvent`] and
//! renders whatever index comes back.

/// Current pager position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    /// Showing the result at this index
    Displaying(usize),
    /// Interaction window closed; no further movement
    Expired,
}

/// Inputs accepted by the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerEvent {
    Prev,
    Next,
    Timeout,
}

/// Wrap-around pager over a fixed-size result list
#[derive(Debug, Clone)]
pub struct Pager {
    state: PagerState,
    len: usize,
}

impl Pager {
    /// Pager over `len` results, starting at the first. A pager over zero
    /// results has nothing to show and starts expired.
    pub fn new(len: usize) -> Self {
        let state = if len == 0 {
            PagerState::Expired
        } else {
            PagerState::Displaying(0)
        };
        Self { state, len }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Index currently shown, if any
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            PagerState::Displaying(index) => Some(index),
            PagerState::Expired => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.state == PagerState::Expired
    }

    /// Apply one event and return the new state. Events after expiry are
    /// ignored; expiry itself is absorbing.
    pub fn apply(&mut self, event: PagerEvent) -> PagerState {
        let PagerState::Displaying(index) = self.state else {
            return self.state;
        };

        self.state = match event {
            PagerEvent::Timeout => PagerState::Expired,
            PagerEvent::Next => {
                let next = if index + 1 < self.len { index + 1 } else { 0 };
                PagerState::Displaying(next)
            }
            PagerEvent::Prev => {
                let prev = if index > 0 { index - 1 } else { self.len - 1 };
                PagerState::Displaying(prev)
            }
        };
        self.state
    }
}
