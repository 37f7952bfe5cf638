//! Carousel component: one instance of the looping engine
//!
//! Composes the slide buffer, position controller, autoplay scheduler and
//! interaction gate behind a single `update(message)` entry point. The
//! render layer applies the returned motions and reports back with
//! `Frame`, `TransitionEnded`, `Scrolled` and `Layout` messages.

use log::{debug, trace, warn};
use shopfront_model::Item;

use crate::autoplay::{AutoplayScheduler, Timer};
use crate::config::CarouselConfig;
use crate::error::Result;
use crate::interaction::{GateDecision, InteractionGate};
use crate::messages::{CarouselMessage, CarouselOutput, NavKey};
use crate::metrics::MetricsProvider;
use crate::navigation::Navigator;
use crate::position::{
    AdvanceOutcome, Motion, PositionController, Track, TransitionMode,
};
use crate::slide_buffer::SlideBuffer;

/// Side effects of one `update` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<P> {
    /// Position writes, in the order they must be applied.
    pub motions: Vec<Motion<P>>,
    pub outputs: Vec<CarouselOutput>,
    /// The host should deliver `CarouselMessage::Frame` after the
    /// re-enable delay.
    pub request_frame: bool,
}

impl<P> Default for Update<P> {
    fn default() -> Self {
        Self {
            motions: Vec::new(),
            outputs: Vec::new(),
            request_frame: false,
        }
    }
}

impl<P> Update<P> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
            && self.outputs.is_empty()
            && !self.request_frame
    }
}

/// Snapshot of what the render layer should draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView<'a, P> {
    /// Padded slide list, clones included.
    pub slides: &'a [Item],
    pub position: Option<P>,
    /// Pixel translation of the track. Falls back to the default step
    /// before anything is measured.
    pub offset_px: f64,
    pub transition: TransitionMode,
    pub active_real: Option<usize>,
    active_padded: Option<usize>,
    clone_width: usize,
}

impl<P> RenderView<'_, P> {
    /// Whether the slide at `padded` is hidden from assistive tech.
    pub fn hidden(&self, padded: usize) -> bool {
        self.active_padded != Some(padded)
    }

    /// Whether dot `real` is selected. No dot is selected while a clone is
    /// on screen.
    pub fn dot_selected(&self, real: usize) -> bool {
        self.active_padded == Some(real + self.clone_width)
    }
}

#[derive(Debug)]
pub struct Carousel<T: Track, Tm: Timer, M> {
    config: CarouselConfig,
    slides: SlideBuffer<Item>,
    controller: PositionController<T>,
    scheduler: AutoplayScheduler<Tm>,
    gate: InteractionGate,
    metrics: M,
    /// A `Frame` has been requested and not delivered yet.
    frame_requested: bool,
    torn_down: bool,
}

impl<T, Tm, M> Carousel<T, Tm, M>
where
    T: Track,
    Tm: Timer,
    M: MetricsProvider,
{
    pub fn new(config: CarouselConfig, timer: Tm, metrics: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            slides: SlideBuffer::empty(T::CLONE_WIDTH),
            controller: PositionController::new(T::for_items(0, &config)),
            scheduler: AutoplayScheduler::new(
                timer,
                config.delay(),
                config.auto_play,
            ),
            gate: InteractionGate::new(config.auto_play),
            metrics,
            config,
            frame_requested: false,
            torn_down: false,
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn controller(&self) -> &PositionController<T> {
        &self.controller
    }

    pub fn scheduler(&self) -> &AutoplayScheduler<Tm> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AutoplayScheduler<Tm> {
        &mut self.scheduler
    }

    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    pub fn slides(&self) -> &SlideBuffer<Item> {
        &self.slides
    }

    pub fn is_mounted(&self) -> bool {
        self.gate.is_attached() && !self.torn_down
    }

    pub fn mount(&mut self, items: Vec<Item>) -> Update<T::Position> {
        self.update(CarouselMessage::Mount(items))
    }

    pub fn set_items(&mut self, items: Vec<Item>) -> Update<T::Position> {
        self.update(CarouselMessage::ItemsChanged(items))
    }

    pub fn unmount(&mut self) -> Update<T::Position> {
        self.update(CarouselMessage::Unmount)
    }

    pub fn render(&self) -> RenderView<'_, T::Position> {
        let position = self.controller.position();
        let step_px = self.metrics.step_or_default();
        RenderView {
            slides: self.slides.items(),
            position,
            offset_px: position
                .map(|pos| self.controller.track().offset_px(pos, step_px))
                .unwrap_or(0.0),
            transition: self.controller.transition(),
            active_real: self.controller.real_index(&self.metrics),
            active_padded: self.controller.padded_index(&self.metrics),
            clone_width: T::CLONE_WIDTH,
        }
    }

    pub fn update(&mut self, message: CarouselMessage) -> Update<T::Position> {
        if self.torn_down {
            trace!("{} after unmount, ignored", message.name());
            return Update::none();
        }
        let mut update = Update::none();

        match message {
            CarouselMessage::Mount(items) => {
                self.gate.attach();
                self.load_items(items, &mut update);
            }
            CarouselMessage::ItemsChanged(items) => {
                self.load_items(items, &mut update);
            }
            CarouselMessage::Unmount => {
                debug!("Carousel unmounted");
                self.scheduler.shutdown();
                self.gate.detach();
                self.controller.clear();
                self.torn_down = true;
                return update;
            }
            CarouselMessage::Next => {
                let outcome = self.navigator().next();
                self.navigated(outcome, &mut update);
            }
            CarouselMessage::Prev => {
                let outcome = self.navigator().prev();
                self.navigated(outcome, &mut update);
            }
            CarouselMessage::JumpTo(real) => {
                match self.navigator().jump_to(real) {
                    Ok(outcome) => self.navigated(outcome, &mut update),
                    Err(err) => {
                        warn!("Ignoring dot navigation: {err}");
                        self.rearm();
                    }
                }
            }
            CarouselMessage::AutoplayFired(ticket) => {
                if self.scheduler.accept(ticket) {
                    trace!("Autoplay tick {}", ticket.id());
                    let outcome = self.navigator().next();
                    self.navigated(outcome, &mut update);
                }
            }
            CarouselMessage::TransitionEnded => {
                update
                    .motions
                    .extend(self.controller.on_transition_end(&self.metrics));
            }
            CarouselMessage::Frame => {
                self.frame_requested = false;
                update.motions.extend(self.controller.on_frame(&self.metrics));
            }
            CarouselMessage::Scrolled(offset_px) => {
                if let Some(pos) =
                    self.controller.track().from_scroll(offset_px)
                {
                    update
                        .motions
                        .extend(self.controller.observe(pos, &self.metrics));
                }
            }
            CarouselMessage::Layout => {
                update
                    .motions
                    .extend(self.controller.retry(&self.metrics));
            }
            CarouselMessage::Wheel { delta_x, delta_y } => {
                // Vertical wheel scrolls the rail sideways
                if delta_y.abs() > delta_x.abs() {
                    update.motions.extend(self.controller.translate(delta_y));
                }
            }
            CarouselMessage::Key(key) => {
                let outcome = match key {
                    NavKey::ArrowLeft => self.navigator().prev(),
                    NavKey::ArrowRight => self.navigator().next(),
                };
                self.navigated(outcome, &mut update);
            }
            CarouselMessage::Interaction(event) => {
                match self.gate.handle(event) {
                    GateDecision::Suspend => self.scheduler.disarm(),
                    GateDecision::Resume => self.rearm(),
                    GateDecision::Unchanged => {}
                }
            }
            CarouselMessage::AddRequested(padded) => {
                match self.slides.real_item(padded) {
                    Some(item) => {
                        update.outputs.push(CarouselOutput::Add(item.clone()))
                    }
                    None => warn!("Add requested for unknown slot {padded}"),
                }
            }
            CarouselMessage::Activated(padded) => {
                match self.slides.real_item(padded) {
                    Some(item) => update
                        .outputs
                        .push(CarouselOutput::Select(item.clone())),
                    None => warn!("Activation of unknown slot {padded}"),
                }
            }
        }

        if self.controller.phase().is_wrapping() && !self.frame_requested {
            self.frame_requested = true;
            update.request_frame = true;
        }
        update
    }

    fn load_items(
        &mut self,
        items: Vec<Item>,
        update: &mut Update<T::Position>,
    ) {
        debug!("Loading {} carousel items", items.len());
        self.slides = SlideBuffer::new(&items, T::CLONE_WIDTH);
        let track = T::for_items(items.len(), &self.config);
        update
            .motions
            .extend(self.controller.remap(track, &self.metrics));
        if self.slides.real_len() == 0 {
            self.scheduler.disarm();
            self.frame_requested = false;
        } else {
            self.rearm();
        }
    }

    /// Apply a navigation outcome and restart the autoplay countdown.
    fn navigated(
        &mut self,
        outcome: AdvanceOutcome<T::Position>,
        update: &mut Update<T::Position>,
    ) {
        match outcome {
            AdvanceOutcome::Moved(motion) | AdvanceOutcome::Rebased(motion) => {
                update.motions.push(motion)
            }
            AdvanceOutcome::Queued => {
                if !self.controller.phase().is_wrapping() {
                    // Behind a request that was waiting for metrics
                    let released = self.controller.retry(&self.metrics);
                    update.motions.extend(released);
                }
            }
            AdvanceOutcome::Deferred | AdvanceOutcome::Ignored => {}
        }
        self.rearm();
    }

    /// Restart the autoplay countdown when nothing holds it back.
    fn rearm(&mut self) {
        if self.slides.real_len() > 0 && self.gate.allows_autoplay() {
            self.scheduler.arm();
        }
    }

    fn navigator(&mut self) -> Navigator<'_, T, M> {
        Navigator::new(
            &mut self.controller,
            &self.metrics,
            self.config.step_cards,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::autoplay::ManualTimer;
    use crate::interaction::InteractionEvent;
    use crate::metrics::{FixedMetrics, MeasuredMetrics};
    use crate::position::{IndexTrack, OffsetTrack};

    fn items(n: usize) -> Vec<Item> {
        (0..n)
            .map(|i| Item::new(format!("/img/{i}.jpg"), format!("Item {i}")))
            .collect()
    }

    fn banner() -> Carousel<IndexTrack, ManualTimer, FixedMetrics> {
        Carousel::new(
            CarouselConfig::banner(),
            ManualTimer::new(),
            FixedMetrics::new(1200.0),
        )
        .unwrap()
    }

    #[test]
    fn mount_places_on_first_real_slide_and_arms() {
        let mut carousel = banner();
        let update = carousel.mount(items(4));
        assert_eq!(update.motions, vec![Motion::instant(1)]);
        assert!(update.request_frame);
        assert!(carousel.scheduler().is_armed());

        let view = carousel.render();
        assert_eq!(view.slides.len(), 6);
        assert_eq!(view.active_real, Some(0));
        assert!(!view.hidden(1));
        assert!(view.hidden(0));
        assert!(view.dot_selected(0));
        assert!(!view.dot_selected(1));
    }

    #[test]
    fn frame_is_requested_once_per_reposition() {
        let mut carousel = banner();
        assert!(carousel.mount(items(3)).request_frame);
        let queued = carousel.update(CarouselMessage::Next);
        assert!(queued.motions.is_empty());
        assert!(!queued.request_frame);

        let released = carousel.update(CarouselMessage::Frame);
        assert_eq!(released.motions, vec![Motion::animated(2)]);
        assert!(!released.request_frame);
    }

    #[test]
    fn empty_list_renders_nothing_and_never_arms() {
        let mut carousel = banner();
        let update = carousel.mount(Vec::new());
        assert!(update.is_empty());
        assert!(!carousel.scheduler().is_armed());
        assert!(carousel.update(CarouselMessage::Next).is_empty());
        assert_eq!(carousel.render().active_real, None);
    }

    #[test]
    fn hover_suspends_autoplay_and_manual_nav_does_not_rearm() {
        let mut carousel = banner();
        carousel.mount(items(4));
        carousel.update(CarouselMessage::Frame);

        carousel.update(CarouselMessage::Interaction(
            InteractionEvent::PointerEnter,
        ));
        assert!(!carousel.scheduler().is_armed());
        carousel.update(CarouselMessage::Next);
        assert!(!carousel.scheduler().is_armed());

        carousel.update(CarouselMessage::Interaction(
            InteractionEvent::PointerLeave,
        ));
        assert!(carousel.scheduler().is_armed());
    }

    #[test]
    fn stale_fire_after_manual_nav_is_ignored() {
        let mut carousel = banner();
        carousel.mount(items(4));
        carousel.update(CarouselMessage::Frame);
        let fired = carousel
            .scheduler_mut()
            .timer_mut()
            .advance(Duration::from_millis(5_000));
        assert_eq!(fired.len(), 1);

        // Manual press re-arms before the fire is delivered
        carousel.update(CarouselMessage::Next);
        let update = carousel.update(CarouselMessage::AutoplayFired(fired[0]));
        assert!(update.motions.is_empty());
        assert_eq!(carousel.controller().position(), Some(2));
    }

    #[test]
    fn outputs_resolve_clones_to_real_items() {
        let mut carousel = banner();
        let list = items(3);
        carousel.mount(list.clone());

        let update = carousel.update(CarouselMessage::Activated(0));
        assert_eq!(
            update.outputs,
            vec![CarouselOutput::Select(list[2].clone())]
        );
        let update = carousel.update(CarouselMessage::AddRequested(4));
        assert_eq!(update.outputs, vec![CarouselOutput::Add(list[0].clone())]);
        assert!(
            carousel
                .update(CarouselMessage::AddRequested(9))
                .outputs
                .is_empty()
        );
    }

    #[test]
    fn keys_map_to_prev_and_next() {
        let mut carousel = banner();
        carousel.mount(items(4));
        carousel.update(CarouselMessage::Frame);
        let update = carousel.update(CarouselMessage::Key(NavKey::ArrowLeft));
        assert_eq!(update.motions, vec![Motion::animated(0)]);
        let update = carousel.update(CarouselMessage::TransitionEnded);
        assert_eq!(update.motions, vec![Motion::instant(4)]);
        carousel.update(CarouselMessage::Frame);
        let update = carousel.update(CarouselMessage::Key(NavKey::ArrowRight));
        assert_eq!(update.motions, vec![Motion::animated(5)]);
    }

    #[test]
    fn dots_are_rejected_on_rails() {
        let mut rail = Carousel::<OffsetTrack, _, _>::new(
            CarouselConfig::product_rail(),
            ManualTimer::new(),
            FixedMetrics::new(200.0),
        )
        .unwrap();
        rail.mount(items(5));
        rail.update(CarouselMessage::Frame);
        let update = rail.update(CarouselMessage::JumpTo(1));
        assert!(update.motions.is_empty());
        assert_eq!(rail.controller().position(), Some(400.0));
    }

    #[test]
    fn layout_retries_a_deferred_placement() {
        let mut rail = Carousel::<OffsetTrack, _, _>::new(
            CarouselConfig::product_rail(),
            ManualTimer::new(),
            MeasuredMetrics::new(),
        )
        .unwrap();
        let update = rail.mount(items(6));
        assert!(update.motions.is_empty());
        assert_eq!(rail.render().offset_px, 0.0);

        rail.metrics().report(crate::metrics::CardMeasurement {
            width: 284.0,
            gap: None,
        });
        let update = rail.update(CarouselMessage::Layout);
        assert_eq!(update.motions, vec![Motion::instant(600.0)]);
        assert!(update.request_frame);
    }

    fn measured_rail() -> Carousel<OffsetTrack, ManualTimer, MeasuredMetrics> {
        let rail = Carousel::new(
            CarouselConfig::product_rail(),
            ManualTimer::new(),
            MeasuredMetrics::new(),
        )
        .unwrap();
        rail.metrics().report(card());
        rail
    }

    fn card() -> crate::metrics::CardMeasurement {
        crate::metrics::CardMeasurement {
            width: 100.0,
            gap: Some(0.0),
        }
    }

    #[test]
    fn presses_behind_a_deferred_move_keep_their_order() {
        let mut rail = measured_rail();
        assert_eq!(rail.mount(items(10)).motions, vec![Motion::instant(200.0)]);
        assert!(rail.update(CarouselMessage::Next).motions.is_empty());

        rail.metrics().clear();
        assert!(rail.update(CarouselMessage::Frame).motions.is_empty());
        assert!(rail.update(CarouselMessage::Layout).motions.is_empty());
        assert!(rail.update(CarouselMessage::Next).motions.is_empty());
        assert_eq!(rail.controller().queued(), 2);
        assert_eq!(rail.controller().position(), Some(200.0));

        rail.metrics().report(card());
        let update = rail.update(CarouselMessage::Layout);
        assert_eq!(
            update.motions,
            vec![Motion::animated(300.0), Motion::animated(400.0)]
        );
        assert_eq!(rail.controller().queued(), 0);

        let update = rail.update(CarouselMessage::Scrolled(1160.0));
        assert_eq!(update.motions, vec![Motion::instant(200.0)]);
        assert!(rail.update(CarouselMessage::Frame).motions.is_empty());
    }

    #[test]
    fn press_releases_a_stranded_request_once_measured() {
        let mut rail = measured_rail();
        rail.mount(items(10));
        rail.update(CarouselMessage::Next);
        rail.metrics().clear();
        rail.update(CarouselMessage::Frame);

        rail.metrics().report(card());
        let update = rail.update(CarouselMessage::Prev);
        assert_eq!(
            update.motions,
            vec![Motion::animated(300.0), Motion::animated(200.0)]
        );
        assert!(rail.scheduler().is_armed());
    }

    #[test]
    fn items_changed_without_metrics_keeps_the_visible_item() {
        let mut rail = measured_rail();
        rail.mount(items(10));
        rail.update(CarouselMessage::Frame);
        rail.update(CarouselMessage::Scrolled(1100.0));
        assert_eq!(rail.render().active_real, Some(9));

        rail.metrics().clear();
        let update = rail.update(CarouselMessage::ItemsChanged(items(3)));
        assert!(update.motions.is_empty());
        assert_eq!(rail.controller().position(), None);

        rail.metrics().report(card());
        let update = rail.update(CarouselMessage::Layout);
        assert_eq!(update.motions, vec![Motion::instant(400.0)]);
        assert!(update.request_frame);
        assert_eq!(rail.render().active_real, Some(2));
    }

    #[test]
    fn wheel_only_translates_on_vertical_gestures() {
        let mut rail = Carousel::<OffsetTrack, _, _>::new(
            CarouselConfig::product_rail(),
            ManualTimer::new(),
            FixedMetrics::new(300.0),
        )
        .unwrap();
        rail.mount(items(8));
        rail.update(CarouselMessage::Frame);

        let sideways = rail.update(CarouselMessage::Wheel {
            delta_x: 30.0,
            delta_y: 10.0,
        });
        assert!(sideways.motions.is_empty());
        let vertical = rail.update(CarouselMessage::Wheel {
            delta_x: 0.0,
            delta_y: 120.0,
        });
        assert_eq!(vertical.motions, vec![Motion::animated(720.0)]);
    }

    #[test]
    fn unmount_stops_everything() {
        let mut carousel = banner();
        carousel.mount(items(4));
        carousel.unmount();
        assert!(!carousel.scheduler().is_armed());
        assert_eq!(carousel.scheduler().timer().pending(), 0);
        assert!(!carousel.is_mounted());
        assert!(carousel.update(CarouselMessage::Next).is_empty());
        assert!(carousel.mount(items(2)).is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig {
            delay_ms: 0,
            ..CarouselConfig::banner()
        };
        assert!(
            Carousel::<IndexTrack, _, _>::new(
                config,
                ManualTimer::new(),
                FixedMetrics::new(100.0)
            )
            .is_err()
        );
    }
}
