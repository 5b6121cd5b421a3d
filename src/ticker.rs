use std::time::Duration;

/// How long each Upcoming pane stays up before rotating.
pub const TICKER_PERIOD: Duration = Duration::from_millis(7_000);
/// Exit animation time before the next pane becomes active.
pub const TICKER_EXIT: Duration = Duration::from_millis(400);

/// Rotation state for the Upcoming ticker.
///
/// A ticker belongs to a single refresh cycle: build a fresh one from the new
/// Upcoming list rather than carrying an old index across refreshes. It owns
/// no timers; the renderer calls [`Ticker::advance`] every [`TICKER_PERIOD`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    len: usize,
    active: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerStep {
    pub exiting: usize,
    pub entering: usize,
}

impl Ticker {
    pub fn for_items(len: usize) -> Self {
        Self { len, active: 0 }
    }

    /// Only lists with more than one pane rotate.
    pub fn is_rotating(&self) -> bool {
        self.len > 1
    }

    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    pub fn advance(&mut self) -> Option<TickerStep> {
        if !self.is_rotating() {
            return None;
        }
        let exiting = self.active;
        self.active = (self.active + 1) % self.len;
        Some(TickerStep {
            exiting,
            entering: self.active,
        })
    }
}
