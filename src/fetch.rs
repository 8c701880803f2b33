//! Stale-response discard for re-triggerable request flows.
//!
//! Search and list views can re-fire a request while a previous one is still
//! in flight, and responses may land out of order. Each dispatch captures a
//! ticket from a monotonically increasing sequence; a response is accepted
//! only if its ticket is still the latest one issued. There is no
//! cancellation of in-flight calls, only discard on arrival.

/// Monotonically increasing request sequence.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
}

/// The sequence value captured when a request was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        RequestSequence::default()
    }

    /// Advances the sequence and returns the ticket for a new dispatch.
    /// Issuing a ticket invalidates every earlier one.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket { seq: self.latest }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.seq == self.latest
    }
}

/// Holds only the result of the most recently dispatched request.
#[derive(Debug, Clone, Default)]
pub struct LatestOnly<T> {
    sequence: RequestSequence,
    value: Option<T>,
}

impl<T> LatestOnly<T> {
    pub fn new() -> Self {
        LatestOnly {
            sequence: RequestSequence::new(),
            value: None,
        }
    }

    /// Call at dispatch time; pass the ticket back with the response.
    pub fn dispatch(&mut self) -> RequestTicket {
        self.sequence.issue()
    }

    /// Accepts a response if its ticket is still current. Returns whether
    /// the value was stored; stale responses are discarded untouched.
    pub fn accept(&mut self, ticket: RequestTicket, value: T) -> bool {
        if self.sequence.is_current(ticket) {
            self.value = Some(value);
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }
}
