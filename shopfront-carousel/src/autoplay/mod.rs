//! Autoplay scheduling
//!
//! A single-shot timer re-armed after every tick. Timers are behind the
//! [`Timer`] trait so the engine runs on tokio in production and on a
//! virtual clock in tests.

pub mod manual;
pub mod scheduler;
pub mod tokio_timer;

use std::time::Duration;

pub use manual::ManualTimer;
pub use scheduler::AutoplayScheduler;
pub use tokio_timer::TokioTimer;

/// Identifies one armed timer. A fire carrying any other ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One-shot timer backend.
pub trait Timer {
    type Handle: std::fmt::Debug;

    /// Deliver `ticket` back to the carousel after `delay`.
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> Self::Handle;

    /// Cancel a scheduled delivery. Cancelling a timer that already fired
    /// must be harmless.
    fn cancel(&mut self, handle: Self::Handle);
}
