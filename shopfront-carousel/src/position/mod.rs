//! Position tracking and the wrap state machine
//!
//! [`PositionController`] is generic over a [`Track`]: [`IndexTrack`] for
//! slide-at-a-time carousels and [`OffsetTrack`] for the natively scrolled
//! product rail. Both share one disable, reposition, re-enable protocol.

pub mod controller;
pub mod phase;
pub mod track;

pub use controller::{
    AdvanceOutcome, Motion, PositionController, TransitionMode,
};
pub use phase::{Phase, PhaseEvent};
pub use track::{Direction, IndexTrack, OffsetTrack, Track};
