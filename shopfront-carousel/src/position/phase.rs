//! Wrap protocol phases and their transition table

/// Position controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Transitions enabled; the position sits inside the real range or is
    /// animating toward a clone.
    #[default]
    Settled,
    /// A silent reposition was written with transitions disabled. Nothing
    /// else may move until the next frame re-enables them.
    Wrapping,
}

/// Inputs that drive [`Phase`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// An animated move was applied.
    Advanced,
    /// A boundary crossing was detected and the position is about to be
    /// rewritten without animation.
    BoundaryDetected,
    /// One frame elapsed since the last write.
    FrameElapsed,
}

impl Phase {
    /// Transition table. `None` marks a pair that must not happen; callers
    /// queue the request behind the pending re-enable instead.
    pub const fn on(self, event: PhaseEvent) -> Option<Phase> {
        match (self, event) {
            (Phase::Settled, PhaseEvent::Advanced) => Some(Phase::Settled),
            (Phase::Settled, PhaseEvent::BoundaryDetected) => {
                Some(Phase::Wrapping)
            }
            (Phase::Settled, PhaseEvent::FrameElapsed) => Some(Phase::Settled),
            (Phase::Wrapping, PhaseEvent::FrameElapsed) => Some(Phase::Settled),
            (Phase::Wrapping, PhaseEvent::Advanced)
            | (Phase::Wrapping, PhaseEvent::BoundaryDetected) => None,
        }
    }

    pub fn is_wrapping(self) -> bool {
        self == Phase::Wrapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_cycle_is_disable_then_reenable() {
        let wrapping = Phase::Settled.on(PhaseEvent::BoundaryDetected);
        assert_eq!(wrapping, Some(Phase::Wrapping));
        assert_eq!(
            Phase::Wrapping.on(PhaseEvent::FrameElapsed),
            Some(Phase::Settled)
        );
    }

    #[test]
    fn nothing_moves_while_wrapping() {
        assert_eq!(Phase::Wrapping.on(PhaseEvent::Advanced), None);
        assert_eq!(Phase::Wrapping.on(PhaseEvent::BoundaryDetected), None);
    }

    #[test]
    fn settled_absorbs_advances_and_frames() {
        assert_eq!(
            Phase::Settled.on(PhaseEvent::Advanced),
            Some(Phase::Settled)
        );
        assert_eq!(
            Phase::Settled.on(PhaseEvent::FrameElapsed),
            Some(Phase::Settled)
        );
    }
}
