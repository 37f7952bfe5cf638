//! Shared harness for carousel integration tests
//!
//! `drive` plays the render layer: it applies every update, reports
//! `TransitionEnded` after each animated move and delivers `Frame` whenever
//! one is requested, until the carousel goes quiet.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use shopfront_carousel::{
    Carousel, CarouselMessage, ManualTimer, MetricsProvider, Motion, Track,
};
use shopfront_model::Item;

pub fn items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| Item::new(format!("/img/slide-{i}.jpg"), format!("Slide {i}")))
        .collect()
}

pub fn drive<T: Track, M: MetricsProvider>(
    carousel: &mut Carousel<T, ManualTimer, M>,
    message: CarouselMessage,
) -> Vec<Motion<T::Position>> {
    let mut written = Vec::new();
    let mut pending = VecDeque::from([message]);
    while let Some(message) = pending.pop_front() {
        let update = carousel.update(message);
        let animated = update.motions.last().is_some_and(|m| !m.is_instant());
        written.extend(update.motions);
        if update.request_frame {
            pending.push_back(CarouselMessage::Frame);
        }
        if animated {
            pending.push_back(CarouselMessage::TransitionEnded);
        }
    }
    written
}

/// Advance the virtual clock and deliver whatever autoplay fires came due.
pub fn elapse<T: Track, M: MetricsProvider>(
    carousel: &mut Carousel<T, ManualTimer, M>,
    by: Duration,
) -> Vec<Motion<T::Position>> {
    let fired = carousel.scheduler_mut().timer_mut().advance(by);
    let mut written = Vec::new();
    for ticket in fired {
        written.extend(drive(carousel, CarouselMessage::AutoplayFired(ticket)));
    }
    written
}
