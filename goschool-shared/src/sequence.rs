//! Last-request-wins ordering for overlapping async requests.
//!
//! Every request takes a [`Ticket`] before it is sent. When the response
//! arrives, it is applied only if no newer ticket has been issued since, so a
//! slow response can never overwrite the result of a later request.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Hands out increasing tickets. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Rc<Cell<u64>>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every earlier one.
    pub fn issue(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }

    /// Invalidates every outstanding ticket.
    pub fn invalidate(&self) {
        self.issue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert!(first < second);
    }

    #[test]
    fn test_clones_share_counter() {
        let sequencer = RequestSequencer::new();
        let handle = sequencer.clone();
        let ticket = sequencer.issue();
        assert!(handle.is_current(ticket));
        handle.invalidate();
        assert!(!sequencer.is_current(ticket));
    }
}
