//! Request sequencing for data-fetch controllers.
//!
//! DESIGN
//! ======
//! Every invocation takes a ticket. A settlement may touch visible state only
//! while its ticket is the newest one issued, so overlapping requests resolve
//! in invocation order no matter which response lands last. Closing the
//! sequence (component teardown) invalidates every outstanding ticket and
//! refuses new ones.

#[cfg(test)]
#[path = "sequence_test.rs"]
mod sequence_test;

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Proof of a single invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct RequestSequence {
    latest: Rc<Cell<u64>>,
    closed: Arc<AtomicBool>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, or `None` once the sequence is closed.
    pub fn issue(&self) -> Option<Ticket> {
        if self.is_closed() {
            return None;
        }
        let next = self.latest.get() + 1;
        self.latest.set(next);
        Some(Ticket(next))
    }

    /// Whether a settlement holding `ticket` may still be applied.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        !self.is_closed() && self.latest.get() == ticket.0
    }

    /// Supersede every outstanding ticket without issuing a request.
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// Thread-safe handle that closes this sequence; suitable for
    /// `on_cleanup`, which requires `Send + Sync`.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.closed))
    }
}

/// Shared cancellation flag. A default handle is not tied to any sequence
/// and can guard other component-scoped work.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
