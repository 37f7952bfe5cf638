use shopfront_model::Item;

use crate::autoplay::Ticket;
use crate::interaction::InteractionEvent;

/// Everything a carousel reacts to, from the render layer, user input and
/// its own timers.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselMessage {
    // Lifecycle
    Mount(Vec<Item>),
    ItemsChanged(Vec<Item>),
    Unmount,

    // Navigation
    Next,
    Prev,
    JumpTo(usize),
    AutoplayFired(Ticket),

    // Render feedback
    TransitionEnded,
    Frame,
    Scrolled(f64),
    Layout,

    // Input
    Wheel { delta_x: f64, delta_y: f64 },
    Key(NavKey),
    Interaction(InteractionEvent),
    AddRequested(usize),
    Activated(usize),
}

impl CarouselMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mount(_) => "Mount",
            Self::ItemsChanged(_) => "ItemsChanged",
            Self::Unmount => "Unmount",
            Self::Next => "Next",
            Self::Prev => "Prev",
            Self::JumpTo(_) => "JumpTo",
            Self::AutoplayFired(_) => "AutoplayFired",
            Self::TransitionEnded => "TransitionEnded",
            Self::Frame => "Frame",
            Self::Scrolled(_) => "Scrolled",
            Self::Layout => "Layout",
            Self::Wheel { .. } => "Wheel",
            Self::Key(_) => "Key",
            Self::Interaction(_) => "Interaction",
            Self::AddRequested(_) => "AddRequested",
            Self::Activated(_) => "Activated",
        }
    }
}

/// Keyboard keys the carousel listens to while focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
}

/// Notifications for the host page. They never change carousel state.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselOutput {
    /// "Add to cart" pressed on a card.
    Add(Item),
    /// A slide or card was activated.
    Select(Item),
}
