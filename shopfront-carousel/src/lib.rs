//! Seamlessly looping carousel engine
//!
//! Drives the storefront's three carousels (promotional banner strip,
//! product rail and category strip) over a finite item list padded with
//! clones at both ends. When the track lands on a clone it is silently
//! repositioned onto the equivalent real item, so navigation appears to
//! loop forever.
//!
//! Layout
//! - [`slide_buffer`]: builds the padded sequence.
//! - [`position`]: the position state machine, generic over [`Track`]
//!   (discrete slide index or pixel offset).
//! - [`navigation`], [`autoplay`], [`interaction`]: navigation requests,
//!   the single-flight autoplay timer and its suspension gate.
//! - [`carousel`]: composes the above behind one `update(message)` call.
//! - [`runtime`]: tokio driver delivering timers and frames as messages.
//!
//! The engine never touches a render tree. It emits [`Motion`] records and
//! [`CarouselOutput`] notifications and reads item sizes through
//! [`MetricsProvider`].

#![allow(missing_docs)]

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod interaction;
pub mod messages;
pub mod metrics;
pub mod navigation;
pub mod position;
pub mod runtime;
pub mod slide_buffer;

pub use autoplay::{AutoplayScheduler, ManualTimer, Ticket, Timer, TokioTimer};
pub use carousel::{Carousel, RenderView, Update};
pub use config::{CarouselConfig, CarouselSettings, Fit};
pub use error::{CarouselError, Result};
pub use interaction::{GateDecision, InteractionEvent, InteractionGate};
pub use messages::{CarouselMessage, CarouselOutput, NavKey};
pub use metrics::{
    CardMeasurement, FixedMetrics, MeasuredMetrics, MetricsProvider,
};
pub use navigation::Navigator;
pub use position::{
    AdvanceOutcome, Direction, IndexTrack, Motion, OffsetTrack, Phase,
    PositionController, Track, TransitionMode,
};
pub use runtime::{CarouselHandle, CarouselRuntime};
pub use slide_buffer::SlideBuffer;

/// Banner strip: one slide at a time, one clone per side.
pub type BannerCarousel<Tm, M> = Carousel<IndexTrack, Tm, M>;

/// Product rail: natively scrolled cards, two clones per side.
pub type ProductRail<Tm, M> = Carousel<OffsetTrack, Tm, M>;

/// Category strip: same track as the banner, autoplay off by preset.
pub type CategoryStrip<Tm, M> = Carousel<IndexTrack, Tm, M>;
