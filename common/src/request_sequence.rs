//! Last-dispatched-wins guard for overlapping resolver requests.

use std::cell::Cell;

/// Ticket handed to one pipeline run; only the newest ticket may apply results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: Cell<u64>,
}

impl RequestSequencer {
    /// Issues a new token, superseding every token issued before it.
    pub fn issue(&self) -> RequestToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get() == token.0
    }

    /// Supersedes all outstanding tokens without starting a new run.
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}
