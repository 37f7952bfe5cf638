//! PositionController: owner of the position and transition mode
//!
//! Every silent reposition follows the same protocol regardless of track:
//! disable transitions, write the position, and only on the next frame
//! re-enable transitions and release any requests that arrived meanwhile.

use std::collections::VecDeque;

use log::{debug, trace};

use super::phase::{Phase, PhaseEvent};
use super::track::{Direction, Track};
use crate::metrics::MetricsProvider;

/// Whether the render layer should animate toward a position write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionMode {
    #[default]
    Animated,
    Instant,
}

/// One position write for the render layer to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion<P> {
    pub to: P,
    pub mode: TransitionMode,
}

impl<P> Motion<P> {
    pub fn animated(to: P) -> Self {
        Self {
            to,
            mode: TransitionMode::Animated,
        }
    }

    pub fn instant(to: P) -> Self {
        Self {
            to,
            mode: TransitionMode::Instant,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.mode == TransitionMode::Instant
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvanceOutcome<P> {
    /// Applied as an animated move.
    Moved(Motion<P>),
    /// A silent rebase was written first; the move follows on the next frame.
    Rebased(Motion<P>),
    /// Waiting behind a pending re-enable or an earlier deferred request.
    Queued,
    /// Metrics unavailable; nothing changed.
    Deferred,
    /// Nothing to navigate.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Step { dir: Direction, stride: usize },
    Jump(usize),
}

#[derive(Debug, Clone)]
pub struct PositionController<T: Track> {
    track: T,
    position: Option<T::Position>,
    phase: Phase,
    transition: TransitionMode,
    queue: VecDeque<Request>,
    /// Real item a deferred placement should land on.
    pending_place: Option<usize>,
    /// Last step that could be measured.
    last_step: Option<f64>,
}

impl<T: Track> PositionController<T> {
    pub fn new(track: T) -> Self {
        Self {
            track,
            position: None,
            phase: Phase::Settled,
            transition: TransitionMode::Animated,
            queue: VecDeque::new(),
            pending_place: None,
            last_step: None,
        }
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    /// Current position, `None` until the first placement succeeds.
    pub fn position(&self) -> Option<T::Position> {
        self.position
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transition(&self) -> TransitionMode {
        self.transition
    }

    /// Requests waiting for the next frame or for metrics to return.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn real_index<M: MetricsProvider + ?Sized>(
        &self,
        metrics: &M,
    ) -> Option<usize> {
        let pos = self.position?;
        let step = self.track.resolve_step(metrics)?;
        self.track.real_index(pos, step)
    }

    pub fn padded_index<M: MetricsProvider + ?Sized>(
        &self,
        metrics: &M,
    ) -> Option<usize> {
        let pos = self.position?;
        let step = self.track.resolve_step(metrics)?;
        Some(self.track.padded_index(pos, step))
    }

    /// Silently place the track on `real`. Deferred (returns `None`) while
    /// the step cannot be measured.
    pub fn place<M: MetricsProvider + ?Sized>(
        &mut self,
        real: usize,
        metrics: &M,
    ) -> Option<Motion<T::Position>> {
        if self.track.real_len() == 0 {
            return None;
        }
        let Some(step) = self.resolve_step(metrics) else {
            debug!("Placement deferred: item metrics unavailable");
            return None;
        };
        self.pending_place = None;
        let to = self.track.position_of(real, step);
        Some(self.reposition(to))
    }

    /// Swap in a track for a new item list, keeping the same real item on
    /// screen when it still exists. Without metrics the position is
    /// dropped and the item is placed by a later [`Self::retry`].
    pub fn remap<M: MetricsProvider + ?Sized>(
        &mut self,
        track: T,
        metrics: &M,
    ) -> Option<Motion<T::Position>> {
        let real = self
            .pending_place
            .or_else(|| self.visible_real(metrics))
            .unwrap_or(0);
        self.track = track;
        self.queue.clear();
        let len = self.track.real_len();
        if len == 0 {
            self.clear();
            return None;
        }
        let real = real.min(len - 1);
        let motion = self.place(real, metrics);
        if motion.is_none() {
            self.position = None;
            self.pending_place = Some(real);
        }
        motion
    }

    /// Forget the position; used when the list becomes empty or unmounts.
    pub fn clear(&mut self) {
        self.position = None;
        self.queue.clear();
        self.pending_place = None;
        self.phase = Phase::Settled;
        self.transition = TransitionMode::Animated;
    }

    pub fn advance<M: MetricsProvider + ?Sized>(
        &mut self,
        dir: Direction,
        stride: usize,
        metrics: &M,
    ) -> AdvanceOutcome<T::Position> {
        self.request(Request::Step { dir, stride }, metrics)
    }

    /// Animated move to a real item (dot navigation).
    pub fn jump_to<M: MetricsProvider + ?Sized>(
        &mut self,
        real: usize,
        metrics: &M,
    ) -> AdvanceOutcome<T::Position> {
        self.request(Request::Jump(real), metrics)
    }

    /// Boundary check after an animated move finished (index tracks).
    pub fn on_transition_end<M: MetricsProvider + ?Sized>(
        &mut self,
        metrics: &M,
    ) -> Option<Motion<T::Position>> {
        if self.phase.is_wrapping() {
            return None;
        }
        let pos = self.position?;
        let step = self.resolve_step(metrics)?;
        let to = self.track.wrap_target(pos, step)?;
        debug!("Transition ended on clone {pos:?}, wrapping to {to:?}");
        Some(self.reposition(to))
    }

    /// Record a live position reported by the render layer (native
    /// scrolling) and rebase if it drifted past the slack.
    pub fn observe<M: MetricsProvider + ?Sized>(
        &mut self,
        observed: T::Position,
        metrics: &M,
    ) -> Option<Motion<T::Position>> {
        if self.position.is_none() || self.phase.is_wrapping() {
            // Stale report from before the placement or the rebase
            return None;
        }
        self.position = Some(observed);
        let Some(step) = self.resolve_step(metrics) else {
            trace!("Scroll observed without metrics; wrap check deferred");
            return None;
        };
        let to = self.track.wrap_target(observed, step)?;
        debug!("Observed {observed:?} past slack, rebasing to {to:?}");
        Some(self.reposition(to))
    }

    /// Free translation (wheel input). Dropped while wrapping.
    pub fn translate(&mut self, delta_px: f64) -> Option<Motion<T::Position>> {
        if self.phase.is_wrapping() {
            return None;
        }
        let to = self.track.translate(self.position?, delta_px)?;
        self.position = Some(to);
        self.transition = TransitionMode::Animated;
        Some(Motion::animated(to))
    }

    /// Frame boundary: re-enable transitions after a silent reposition, then
    /// release queued requests against the corrected position.
    pub fn on_frame<M: MetricsProvider + ?Sized>(
        &mut self,
        metrics: &M,
    ) -> Vec<Motion<T::Position>> {
        if self.phase.is_wrapping() {
            self.phase = self
                .phase
                .on(PhaseEvent::FrameElapsed)
                .unwrap_or(Phase::Settled);
            self.transition = TransitionMode::Animated;
            trace!("Transitions re-enabled, {} queued", self.queue.len());
        }
        self.drain(metrics)
    }

    /// Pick up work held back by missing metrics: a deferred placement,
    /// or requests left queued when a released move could not be measured.
    pub fn retry<M: MetricsProvider + ?Sized>(
        &mut self,
        metrics: &M,
    ) -> Vec<Motion<T::Position>> {
        if self.position.is_none() {
            let real = self.pending_place.unwrap_or(0);
            return self.place(real, metrics).into_iter().collect();
        }
        self.drain(metrics)
    }

    fn request<M: MetricsProvider + ?Sized>(
        &mut self,
        request: Request,
        metrics: &M,
    ) -> AdvanceOutcome<T::Position> {
        if self.track.real_len() == 0 {
            return AdvanceOutcome::Ignored;
        }
        if self.phase.is_wrapping() || !self.queue.is_empty() {
            // Never overtake an earlier request
            self.queue.push_back(request);
            return AdvanceOutcome::Queued;
        }
        if self.position.is_none() {
            // Late placement: show the first item, move on the next frame
            let real = self.pending_place.unwrap_or(0);
            let Some(motion) = self.place(real, metrics) else {
                return AdvanceOutcome::Deferred;
            };
            self.queue.push_back(request);
            return AdvanceOutcome::Rebased(motion);
        }
        self.apply(request, metrics)
    }

    /// Apply queued requests in order until one rebases or is deferred.
    fn drain<M: MetricsProvider + ?Sized>(
        &mut self,
        metrics: &M,
    ) -> Vec<Motion<T::Position>> {
        let mut motions = Vec::new();
        while !self.phase.is_wrapping() {
            let Some(request) = self.queue.pop_front() else {
                break;
            };
            match self.apply(request, metrics) {
                AdvanceOutcome::Moved(motion)
                | AdvanceOutcome::Rebased(motion) => motions.push(motion),
                AdvanceOutcome::Deferred => {
                    self.queue.push_front(request);
                    break;
                }
                AdvanceOutcome::Queued | AdvanceOutcome::Ignored => {}
            }
        }
        motions
    }

    fn apply<M: MetricsProvider + ?Sized>(
        &mut self,
        request: Request,
        metrics: &M,
    ) -> AdvanceOutcome<T::Position> {
        let Some(pos) = self.position else {
            return AdvanceOutcome::Ignored;
        };
        let Some(step) = self.resolve_step(metrics) else {
            debug!("Advance deferred: item metrics unavailable");
            return AdvanceOutcome::Deferred;
        };

        let (rebase, target) = match request {
            Request::Step { dir, stride } => (
                self.track.rebase_before(pos, dir, stride, step),
                self.track.advance(pos, dir, stride, step),
            ),
            Request::Jump(real) => (
                self.track.wrap_target(pos, step),
                self.track.position_of(real, step),
            ),
        };

        if let Some(rebased) = rebase {
            debug!("Rebasing {pos:?} -> {rebased:?} before {request:?}");
            let motion = self.reposition(rebased);
            self.queue.push_front(request);
            return AdvanceOutcome::Rebased(motion);
        }

        if let Some(next) = self.phase.on(PhaseEvent::Advanced) {
            self.phase = next;
        }
        self.position = Some(target);
        self.transition = TransitionMode::Animated;
        AdvanceOutcome::Moved(Motion::animated(target))
    }

    fn resolve_step<M: MetricsProvider + ?Sized>(
        &mut self,
        metrics: &M,
    ) -> Option<f64> {
        let step = self.track.resolve_step(metrics)?;
        self.last_step = Some(step);
        Some(step)
    }

    /// Real item on screen, measured with the last known step when the
    /// render layer has nothing mounted right now.
    fn visible_real<M: MetricsProvider + ?Sized>(
        &self,
        metrics: &M,
    ) -> Option<usize> {
        let pos = self.position?;
        let step = self.track.resolve_step(metrics).or(self.last_step)?;
        self.track.real_index(pos, step)
    }

    /// Un-animated write. Enters `Wrapping` from `Settled`; a write while
    /// already wrapping stays un-animated and keeps the pending re-enable.
    fn reposition(&mut self, to: T::Position) -> Motion<T::Position> {
        if let Some(next) = self.phase.on(PhaseEvent::BoundaryDetected) {
            self.phase = next;
        }
        self.transition = TransitionMode::Instant;
        self.position = Some(to);
        Motion::instant(to)
    }
}
