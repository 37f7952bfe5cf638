//! Physical step measurement
//!
//! The render layer owns layout; the engine only asks, on demand, how wide
//! one item plus its gap currently is.

use std::cell::Cell;

/// Step used by callers that need a number before anything is measured.
pub const DEFAULT_STEP_PX: f64 = 600.0;

/// Gap assumed when the render layer reports a card without one.
pub const DEFAULT_GAP_PX: f64 = 16.0;

/// Source of the current item stride in pixels.
pub trait MetricsProvider {
    /// Width of one rendered item plus the inter-item gap, or `None` when
    /// no item is mounted.
    fn measure_step(&self) -> Option<f64>;

    /// Measured step, falling back to [`DEFAULT_STEP_PX`].
    fn step_or_default(&self) -> f64 {
        self.measure_step().unwrap_or(DEFAULT_STEP_PX)
    }
}

impl<M: MetricsProvider + ?Sized> MetricsProvider for &M {
    fn measure_step(&self) -> Option<f64> {
        (**self).measure_step()
    }
}

/// Constant stride, for fixed-size cards and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    step: f64,
}

impl FixedMetrics {
    pub fn new(step: f64) -> Self {
        Self { step }
    }
}

impl MetricsProvider for FixedMetrics {
    fn measure_step(&self) -> Option<f64> {
        (self.step.is_finite() && self.step > 0.0).then_some(self.step)
    }
}

/// Card size reported by the render layer after layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMeasurement {
    pub width: f64,
    /// Computed gap; `None` when the style does not define one.
    pub gap: Option<f64>,
}

/// Metrics fed by layout callbacks.
///
/// Reads never mutate engine state, so the render layer may update the
/// measurement between any two engine calls.
#[derive(Debug, Default)]
pub struct MeasuredMetrics {
    card: Cell<Option<CardMeasurement>>,
}

impl MeasuredMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, card: CardMeasurement) {
        self.card.set(Some(card));
    }

    /// Nothing is mounted any more.
    pub fn clear(&self) {
        self.card.set(None);
    }
}

impl MetricsProvider for MeasuredMetrics {
    fn measure_step(&self) -> Option<f64> {
        let card = self.card.get()?;
        if !card.width.is_finite() || card.width <= 0.0 {
            return None;
        }
        let gap = card
            .gap
            .filter(|gap| gap.is_finite())
            .unwrap_or(DEFAULT_GAP_PX);
        Some(card.width + gap.max(0.0))
    }
}
