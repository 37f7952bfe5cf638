//! Tokio driver for a carousel
//!
//! The runtime owns the carousel and feeds it one message at a time from an
//! unbounded inbox, so every position write is serialized on one task.
//! Autoplay fires and frame re-enables are posted back into the same inbox.

use log::{debug, trace};
use shopfront_model::Item;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::autoplay::TokioTimer;
use crate::carousel::{Carousel, Update};
use crate::config::CarouselConfig;
use crate::error::Result;
use crate::interaction::InteractionEvent;
use crate::messages::CarouselMessage;
use crate::metrics::MetricsProvider;
use crate::position::Track;

/// Cloneable sender side of a running carousel.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    sender: UnboundedSender<CarouselMessage>,
}

impl CarouselHandle {
    /// Returns `false` once the runtime has stopped.
    pub fn send(&self, message: CarouselMessage) -> bool {
        self.sender.send(message).is_ok()
    }

    pub fn mount(&self, items: Vec<Item>) -> bool {
        self.send(CarouselMessage::Mount(items))
    }

    pub fn next(&self) -> bool {
        self.send(CarouselMessage::Next)
    }

    pub fn prev(&self) -> bool {
        self.send(CarouselMessage::Prev)
    }

    pub fn interaction(&self, event: InteractionEvent) -> bool {
        self.send(CarouselMessage::Interaction(event))
    }

    pub fn unmount(&self) -> bool {
        self.send(CarouselMessage::Unmount)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Debug)]
pub struct CarouselRuntime<T: Track, M> {
    carousel: Carousel<T, TokioTimer, M>,
    inbox: UnboundedReceiver<CarouselMessage>,
    updates: UnboundedSender<Update<T::Position>>,
    frame_task: Option<JoinHandle<()>>,
    weak_sender: mpsc::WeakUnboundedSender<CarouselMessage>,
}

impl<T, M> CarouselRuntime<T, M>
where
    T: Track,
    M: MetricsProvider,
{
    /// Build a runtime with its control handle and the stream of updates
    /// for the render layer. Nothing runs until [`CarouselRuntime::run`] is
    /// awaited.
    pub fn new(
        config: CarouselConfig,
        metrics: M,
    ) -> Result<(Self, CarouselHandle, UnboundedReceiver<Update<T::Position>>)>
    {
        let (sender, inbox) = mpsc::unbounded_channel();
        let (updates, update_rx) = mpsc::unbounded_channel();
        let timer = TokioTimer::new(&sender);
        let carousel = Carousel::new(config, timer, metrics)?;

        let runtime = Self {
            carousel,
            inbox,
            updates,
            frame_task: None,
            weak_sender: sender.downgrade(),
        };
        Ok((runtime, CarouselHandle { sender }, update_rx))
    }

    pub fn carousel(&self) -> &Carousel<T, TokioTimer, M> {
        &self.carousel
    }

    /// Process messages until `Unmount` or until every handle is dropped.
    /// Returns the carousel for inspection.
    pub async fn run(mut self) -> Carousel<T, TokioTimer, M> {
        while let Some(message) = self.inbox.recv().await {
            trace!("Carousel message: {}", message.name());
            let stop = matches!(message, CarouselMessage::Unmount);
            let update = self.carousel.update(message);
            if update.request_frame {
                self.schedule_frame();
            }
            if !update.is_empty() {
                // Nobody listening is fine; the carousel keeps running
                let _ = self.updates.send(update);
            }
            if stop {
                break;
            }
        }

        if self.carousel.is_mounted() {
            debug!("Carousel inbox closed, tearing down");
            self.carousel.unmount();
        }
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }
        self.carousel
    }

    fn schedule_frame(&mut self) {
        if let Some(task) = self.frame_task.take() {
            task.abort();
        }
        let delay = self.carousel.config().reenable_delay();
        let inbox = self.weak_sender.clone();
        self.frame_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inbox) = inbox.upgrade() {
                let _ = inbox.send(CarouselMessage::Frame);
            }
        }));
    }
}
