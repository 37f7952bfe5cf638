//! Step representations shared by the position controller
//!
//! A track knows how positions are expressed (padded slide index or pixel
//! offset), where the real range ends and where a wrapped position lands.
//! It holds no mutable state.

use std::fmt::Debug;

use crate::config::CarouselConfig;
use crate::metrics::MetricsProvider;

/// Direction of a discrete advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn signum(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Position arithmetic for one carousel variant.
pub trait Track: Debug {
    type Position: Copy + PartialEq + Debug + Send + 'static;

    /// Clones prepended and appended to the real sequence.
    const CLONE_WIDTH: usize;

    /// Whether dot navigation to a real index is meaningful.
    const SUPPORTS_JUMP: bool;

    fn for_items(real_len: usize, config: &CarouselConfig) -> Self;

    fn real_len(&self) -> usize;

    /// Size of one step in this track's units, `None` while it cannot be
    /// measured.
    fn resolve_step<M: MetricsProvider + ?Sized>(
        &self,
        metrics: &M,
    ) -> Option<f64>;

    /// Position that shows `real` inside the real range.
    fn position_of(&self, real: usize, step: f64) -> Self::Position;

    /// Padded slot nearest to `pos`.
    fn padded_index(&self, pos: Self::Position, step: f64) -> usize;

    /// Equivalent in-range position when `pos` has crossed a boundary.
    fn wrap_target(&self, pos: Self::Position, step: f64)
    -> Option<Self::Position>;

    /// Un-animated rebase required before advancing from `pos`.
    fn rebase_before(
        &self,
        pos: Self::Position,
        dir: Direction,
        stride: usize,
        step: f64,
    ) -> Option<Self::Position>;

    fn advance(
        &self,
        pos: Self::Position,
        dir: Direction,
        stride: usize,
        step: f64,
    ) -> Self::Position;

    /// Live scroll offset reported by the render layer, for tracks driven
    /// by native scrolling.
    fn from_scroll(&self, _offset_px: f64) -> Option<Self::Position> {
        None
    }

    /// Free pixel translation (wheel input), for tracks that support it.
    fn translate(
        &self,
        _pos: Self::Position,
        _delta_px: f64,
    ) -> Option<Self::Position> {
        None
    }

    /// Pixel offset of `pos` given the physical item stride.
    fn offset_px(&self, pos: Self::Position, step_px: f64) -> f64;

    fn padded_len(&self) -> usize {
        if self.real_len() == 0 {
            0
        } else {
            self.real_len() + 2 * Self::CLONE_WIDTH
        }
    }

    /// Real item shown at `pos`; always inside `[0, N)`.
    fn real_index(&self, pos: Self::Position, step: f64) -> Option<usize> {
        let n = self.real_len();
        if n == 0 {
            return None;
        }
        let shifted =
            self.padded_index(pos, step) as isize - Self::CLONE_WIDTH as isize;
        Some(shifted.rem_euclid(n as isize) as usize)
    }
}

/// Discrete slide index into the padded sequence (banner and category
/// strips). One clone per side; the step is always one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTrack {
    real_len: usize,
}

impl IndexTrack {
    pub fn new(real_len: usize) -> Self {
        Self { real_len }
    }
}

impl Track for IndexTrack {
    type Position = usize;

    const CLONE_WIDTH: usize = 1;
    const SUPPORTS_JUMP: bool = true;

    fn for_items(real_len: usize, _config: &CarouselConfig) -> Self {
        Self::new(real_len)
    }

    fn real_len(&self) -> usize {
        self.real_len
    }

    fn resolve_step<M: MetricsProvider + ?Sized>(
        &self,
        _metrics: &M,
    ) -> Option<f64> {
        (self.real_len > 0).then_some(1.0)
    }

    fn position_of(&self, real: usize, _step: f64) -> usize {
        real.min(self.real_len.saturating_sub(1)) + Self::CLONE_WIDTH
    }

    fn padded_index(&self, pos: usize, _step: f64) -> usize {
        pos
    }

    fn wrap_target(&self, pos: usize, _step: f64) -> Option<usize> {
        let k = Self::CLONE_WIDTH;
        if self.real_len == 0 {
            None
        } else if pos < k {
            Some(pos + self.real_len)
        } else if pos >= self.real_len + k {
            Some(pos - self.real_len)
        } else {
            None
        }
    }

    fn rebase_before(
        &self,
        pos: usize,
        _dir: Direction,
        _stride: usize,
        step: f64,
    ) -> Option<usize> {
        // Parked on a clone whose transition end never arrived
        self.wrap_target(pos, step)
    }

    fn advance(
        &self,
        pos: usize,
        dir: Direction,
        _stride: usize,
        _step: f64,
    ) -> usize {
        match dir {
            Direction::Forward => {
                (pos + 1).min(self.padded_len().saturating_sub(1))
            }
            Direction::Backward => pos.saturating_sub(1),
        }
    }

    fn offset_px(&self, pos: usize, step_px: f64) -> f64 {
        pos as f64 * step_px
    }
}

/// Continuous pixel offset over a natively scrolled rail. Two clones per
/// side; the step comes from the measured card stride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetTrack {
    real_len: usize,
    /// Rebase slack as a fraction of one step.
    slack: f64,
}

impl OffsetTrack {
    pub fn new(real_len: usize, slack: f64) -> Self {
        Self { real_len, slack }
    }

    /// Offsets delimiting the real range: first and last real card.
    pub fn bounds(&self, step: f64) -> (f64, f64) {
        let k = Self::CLONE_WIDTH as f64;
        let last = self.real_len.saturating_sub(1) as f64;
        (step * k, step * (k + last))
    }

    fn crossing(&self, offset: f64, step: f64) -> Option<f64> {
        let (min, max) = self.bounds(step);
        let slack = step * self.slack;
        if offset < min - slack {
            Some(max)
        } else if offset > max + slack {
            Some(min)
        } else {
            None
        }
    }
}

impl Track for OffsetTrack {
    type Position = f64;

    const CLONE_WIDTH: usize = 2;
    const SUPPORTS_JUMP: bool = false;

    fn for_items(real_len: usize, config: &CarouselConfig) -> Self {
        Self::new(real_len, config.wrap_slack)
    }

    fn real_len(&self) -> usize {
        self.real_len
    }

    fn resolve_step<M: MetricsProvider + ?Sized>(
        &self,
        metrics: &M,
    ) -> Option<f64> {
        if self.real_len == 0 {
            return None;
        }
        metrics.measure_step()
    }

    fn position_of(&self, real: usize, step: f64) -> f64 {
        let real = real.min(self.real_len.saturating_sub(1));
        step * (Self::CLONE_WIDTH + real) as f64
    }

    fn padded_index(&self, pos: f64, step: f64) -> usize {
        let last = self.padded_len().saturating_sub(1) as f64;
        (pos / step).round().clamp(0.0, last) as usize
    }

    fn wrap_target(&self, pos: f64, step: f64) -> Option<f64> {
        self.crossing(pos, step)
    }

    fn rebase_before(
        &self,
        pos: f64,
        dir: Direction,
        stride: usize,
        step: f64,
    ) -> Option<f64> {
        self.crossing(self.advance(pos, dir, stride, step), step)
    }

    fn advance(
        &self,
        pos: f64,
        dir: Direction,
        stride: usize,
        step: f64,
    ) -> f64 {
        pos + f64::from(dir.signum()) * step * stride as f64
    }

    fn from_scroll(&self, offset_px: f64) -> Option<f64> {
        offset_px.is_finite().then_some(offset_px)
    }

    fn translate(&self, pos: f64, delta_px: f64) -> Option<f64> {
        delta_px.is_finite().then_some(pos + delta_px)
    }

    fn offset_px(&self, pos: f64, _step_px: f64) -> f64 {
        pos
    }
}
