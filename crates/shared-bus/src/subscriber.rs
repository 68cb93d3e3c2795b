//! # Event Subscriber
//!
//! A `Subscription` is one broadcast receiver plus the filter applied on
//! receive. A subscriber that falls more than the bus capacity behind skips
//! the oldest events and keeps going; the skipped count is kept on the
//! handle.

use crate::events::{CourtEvent, EventFilter};
use crate::publisher::{BusStats, InMemoryEventBus};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped.
    #[error("Event bus closed")]
    Closed,
}

/// Subscribing side of the bus.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        InMemoryEventBus::subscribe(self, filter)
    }
}

/// Receiving handle. Dropping it releases its listener slots.
pub struct Subscription {
    receiver: broadcast::Receiver<CourtEvent>,
    filter: EventFilter,
    stats: Arc<BusStats>,
    skipped: u64,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<CourtEvent>,
        filter: EventFilter,
        stats: Arc<BusStats>,
    ) -> Self {
        Self {
            receiver,
            filter,
            stats,
            skipped: 0,
        }
    }

    /// Next matching event, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<CourtEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(RecvError::Lagged(missed)) => self.record_lag(missed),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next queued matching event. `Ok(None)` means nothing is queued.
    pub fn try_recv(&mut self) -> Result<Option<CourtEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(TryRecvError::Lagged(missed)) => self.record_lag(missed),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Closed) => return Err(SubscriptionError::Closed),
            }
        }
    }

    /// Every queued matching event, oldest first.
    pub fn drain(&mut self) -> Vec<CourtEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Events lost to lag since the subscription opened.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn record_lag(&mut self, missed: u64) {
        self.skipped += missed;
        warn!(missed, total = self.skipped, "Subscriber lagged behind the bus");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stats.detach(&self.filter);
    }
}
