//! Navigation requests (arrows, keys, dots, autoplay ticks)
//!
//! Each call issues exactly one request to the position controller. There
//! is no debouncing: rapid presses queue up as rapid advances.

use crate::error::{CarouselError, Result};
use crate::metrics::MetricsProvider;
use crate::position::{AdvanceOutcome, Direction, PositionController, Track};

/// Short-lived view over a controller for one navigation call.
#[derive(Debug)]
pub struct Navigator<'a, T: Track, M: ?Sized> {
    controller: &'a mut PositionController<T>,
    metrics: &'a M,
    step_cards: usize,
}

impl<'a, T: Track, M: MetricsProvider + ?Sized> Navigator<'a, T, M> {
    pub fn new(
        controller: &'a mut PositionController<T>,
        metrics: &'a M,
        step_cards: usize,
    ) -> Self {
        Self {
            controller,
            metrics,
            step_cards: step_cards.max(1),
        }
    }

    pub fn next(&mut self) -> AdvanceOutcome<T::Position> {
        self.controller
            .advance(Direction::Forward, self.step_cards, self.metrics)
    }

    pub fn prev(&mut self) -> AdvanceOutcome<T::Position> {
        self.controller
            .advance(Direction::Backward, self.step_cards, self.metrics)
    }

    /// Dot navigation to real item `real`.
    pub fn jump_to(
        &mut self,
        real: usize,
    ) -> Result<AdvanceOutcome<T::Position>> {
        if !T::SUPPORTS_JUMP {
            return Err(CarouselError::JumpUnsupported);
        }
        let len = self.controller.track().real_len();
        if len == 0 {
            return Ok(AdvanceOutcome::Ignored);
        }
        if real >= len {
            return Err(CarouselError::IndexOutOfRange { index: real, len });
        }
        Ok(self.controller.jump_to(real, self.metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FixedMetrics;
    use crate::position::{IndexTrack, Motion, OffsetTrack};

    #[test]
    fn dots_map_real_index_to_padded_slot() {
        let metrics = FixedMetrics::new(300.0);
        let mut controller = PositionController::new(IndexTrack::new(4));
        controller.place(0, &metrics);
        controller.on_frame(&metrics);

        let mut nav = Navigator::new(&mut controller, &metrics, 1);
        assert_eq!(
            nav.jump_to(2).unwrap(),
            AdvanceOutcome::Moved(Motion::animated(3))
        );
        assert!(matches!(
            nav.jump_to(4),
            Err(CarouselError::IndexOutOfRange { index: 4, len: 4 })
        ));
    }

    #[test]
    fn offset_tracks_have_no_dots() {
        let metrics = FixedMetrics::new(300.0);
        let mut controller = PositionController::new(OffsetTrack::new(6, 0.5));
        let mut nav = Navigator::new(&mut controller, &metrics, 1);
        assert!(matches!(nav.jump_to(0), Err(CarouselError::JumpUnsupported)));
    }

    #[test]
    fn step_cards_scale_offset_moves() {
        let metrics = FixedMetrics::new(100.0);
        let mut controller = PositionController::new(OffsetTrack::new(10, 0.5));
        controller.place(0, &metrics);
        controller.on_frame(&metrics);

        let mut nav = Navigator::new(&mut controller, &metrics, 3);
        assert_eq!(nav.next(), AdvanceOutcome::Moved(Motion::animated(500.0)));
        assert_eq!(nav.prev(), AdvanceOutcome::Moved(Motion::animated(200.0)));
    }

    #[test]
    fn empty_list_ignores_navigation() {
        let metrics = FixedMetrics::new(100.0);
        let mut controller = PositionController::new(IndexTrack::new(0));
        let mut nav = Navigator::new(&mut controller, &metrics, 1);
        assert_eq!(nav.next(), AdvanceOutcome::Ignored);
        assert_eq!(nav.prev(), AdvanceOutcome::Ignored);
        assert_eq!(nav.jump_to(0).unwrap(), AdvanceOutcome::Ignored);
    }
}
