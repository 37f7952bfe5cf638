use std::collections::BTreeMap;
use std::time::Duration;

use super::{Ticket, Timer};

/// Virtual-clock timer. Nothing fires until [`ManualTimer::advance`] moves
/// the clock past a deadline.
#[derive(Debug, Default)]
pub struct ManualTimer {
    now: Duration,
    next_handle: u64,
    /// (deadline, handle) -> ticket; ordered by deadline then arm order
    queue: BTreeMap<(Duration, u64), Ticket>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of scheduled, not yet fired, timers.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time left until the earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue
            .keys()
            .next()
            .map(|(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Move the clock forward and return the tickets that came due, in
    /// deadline order.
    pub fn advance(&mut self, by: Duration) -> Vec<Ticket> {
        self.now += by;
        let mut fired = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            fired.push(entry.remove());
        }
        fired
    }
}

impl Timer for ManualTimer {
    type Handle = u64;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> u64 {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.queue.insert((self.now + delay, handle), ticket);
        handle
    }

    fn cancel(&mut self, handle: u64) {
        self.queue.retain(|(_, id), _| *id != handle);
    }
}
