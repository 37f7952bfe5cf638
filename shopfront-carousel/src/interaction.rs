//! Autoplay suspension from user interaction and page visibility

use log::{debug, trace};

/// Input that may suspend or resume autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnter,
    PointerLeave,
    TouchStart,
    TouchEnd,
    VisibilityChanged { hidden: bool },
}

/// What the scheduler should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Suspend,
    Resume,
    Unchanged,
}

/// Tracks everything that can hold autoplay back.
///
/// Autoplay runs only while enabled, attached, not hovered, not touched
/// and visible; any one of them suspends it.
#[derive(Debug, Clone, Default)]
pub struct InteractionGate {
    enabled: bool,
    attached: bool,
    pointer_over: bool,
    touch_active: bool,
    hidden: bool,
}

impl InteractionGate {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening. Pointer and touch state is reset so a later mount
    /// starts clean.
    pub fn detach(&mut self) {
        self.attached = false;
        self.pointer_over = false;
        self.touch_active = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn set_enabled(&mut self, enabled: bool) -> GateDecision {
        let before = self.allows_autoplay();
        self.enabled = enabled;
        self.decide(before)
    }

    pub fn allows_autoplay(&self) -> bool {
        self.enabled
            && self.attached
            && !self.pointer_over
            && !self.touch_active
            && !self.hidden
    }

    pub fn handle(&mut self, event: InteractionEvent) -> GateDecision {
        if !self.attached {
            trace!("Interaction {event:?} while detached, ignored");
            return GateDecision::Unchanged;
        }
        let before = self.allows_autoplay();
        match event {
            InteractionEvent::PointerEnter => self.pointer_over = true,
            InteractionEvent::PointerLeave => self.pointer_over = false,
            InteractionEvent::TouchStart => self.touch_active = true,
            InteractionEvent::TouchEnd => self.touch_active = false,
            InteractionEvent::VisibilityChanged { hidden } => {
                self.hidden = hidden
            }
        }
        let decision = self.decide(before);
        if decision != GateDecision::Unchanged {
            debug!("Autoplay {decision:?} after {event:?}");
        }
        decision
    }

    fn decide(&self, before: bool) -> GateDecision {
        match (before, self.allows_autoplay()) {
            (true, false) => GateDecision::Suspend,
            (false, true) => GateDecision::Resume,
            _ => GateDecision::Unchanged,
        }
    }
}
