use std::time::Duration;

use log::{debug, trace};

use super::{Ticket, Timer};

/// Owns the single pending autoplay timer of one carousel.
#[derive(Debug)]
pub struct AutoplayScheduler<Tm: Timer> {
    timer: Tm,
    delay: Duration,
    enabled: bool,
    pending: Option<(Ticket, Tm::Handle)>,
    next_ticket: u64,
    alive: bool,
}

impl<Tm: Timer> AutoplayScheduler<Tm> {
    pub fn new(timer: Tm, delay: Duration, enabled: bool) -> Self {
        Self {
            timer,
            delay,
            enabled,
            pending: None,
            next_ticket: 0,
            alive: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timer(&self) -> &Tm {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Tm {
        &mut self.timer
    }

    /// Cancel any pending timer and schedule a fresh one. Returns `false`
    /// when autoplay is disabled or the scheduler was shut down.
    pub fn arm(&mut self) -> bool {
        if !self.alive || !self.enabled {
            return false;
        }
        self.disarm();
        self.next_ticket += 1;
        let ticket = Ticket::new(self.next_ticket);
        let handle = self.timer.schedule(self.delay, ticket);
        trace!("Autoplay armed: {ticket:?} in {:?}", self.delay);
        self.pending = Some((ticket, handle));
        true
    }

    pub fn disarm(&mut self) {
        if let Some((ticket, handle)) = self.pending.take() {
            trace!("Autoplay disarmed: {ticket:?}");
            self.timer.cancel(handle);
        }
    }

    /// Admit a fired timer. Only the currently armed ticket of a live
    /// scheduler is accepted; everything else is a stale fire.
    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if !self.alive {
            debug!("Ignoring autoplay fire {ticket:?} after teardown");
            return false;
        }
        match self.pending {
            Some((current, _)) if current == ticket => {
                self.pending = None;
                true
            }
            _ => {
                debug!("Ignoring stale autoplay fire {ticket:?}");
                false
            }
        }
    }

    /// Disarm for good; later `arm` calls and fires are no-ops.
    pub fn shutdown(&mut self) {
        self.disarm();
        self.alive = false;
    }
}
