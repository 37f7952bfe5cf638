use std::time::Duration;

use tokio::sync::mpsc::{UnboundedSender, WeakUnboundedSender};
use tokio::task::JoinHandle;

use super::{Ticket, Timer};
use crate::messages::CarouselMessage;

/// Timer backed by a tokio task that posts the fire back into the
/// carousel's inbox. Must be used from within a tokio runtime.
///
/// Holds only a weak sender, so a pending timer never keeps the inbox
/// open on its own.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    inbox: WeakUnboundedSender<CarouselMessage>,
}

impl TokioTimer {
    pub fn new(inbox: &UnboundedSender<CarouselMessage>) -> Self {
        Self {
            inbox: inbox.downgrade(),
        }
    }
}

impl Timer for TokioTimer {
    type Handle = JoinHandle<()>;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> JoinHandle<()> {
        let inbox = self.inbox.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inbox) = inbox.upgrade() {
                // Closed inbox means the carousel is gone
                let _ = inbox.send(CarouselMessage::AutoplayFired(ticket));
            }
        })
    }

    fn cancel(&mut self, handle: JoinHandle<()>) {
        handle.abort();
    }
}
