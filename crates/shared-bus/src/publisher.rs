//! # Event Publisher
//!
//! `InMemoryEventBus` fans every `CourtEvent` out over a
//! `tokio::sync::broadcast` channel. It also counts, per topic, how many
//! live subscriptions could receive an event, and how many events went out
//! to nobody.

use crate::events::{CourtEvent, EventFilter, EventTopic};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Publishing side of the bus.
///
/// Court components hold this trait rather than a concrete bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event, returning how many subscriptions it reached.
    async fn publish(&self, event: CourtEvent) -> usize;

    /// Events published since the bus was created.
    fn events_published(&self) -> u64;
}

#[async_trait]
impl<T: EventPublisher + ?Sized> EventPublisher for Arc<T> {
    async fn publish(&self, event: CourtEvent) -> usize {
        (**self).publish(event).await
    }

    fn events_published(&self) -> u64 {
        (**self).events_published()
    }
}

/// Counters shared by the bus and every subscription it hands out.
#[derive(Debug, Default)]
pub(crate) struct BusStats {
    published: AtomicU64,
    undelivered: AtomicU64,
    listeners: Mutex<HashMap<EventTopic, usize>>,
}

impl BusStats {
    pub(crate) fn attach(&self, filter: &EventFilter) {
        let mut listeners = self.listeners.lock();
        for topic in filter.covered_topics() {
            *listeners.entry(topic).or_insert(0) += 1;
        }
    }

    pub(crate) fn detach(&self, filter: &EventFilter) {
        let mut listeners = self.listeners.lock();
        for topic in filter.covered_topics() {
            if let Some(count) = listeners.get_mut(&topic) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    listeners.remove(&topic);
                }
            }
        }
    }
}

/// Process-local event bus.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<CourtEvent>,
    stats: Arc<BusStats>,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// A bus buffering at most `capacity` events per subscription.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            stats: Arc::new(BusStats::default()),
            capacity,
        }
    }

    /// Subscribe to events matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.stats.attach(&filter);
        debug!(topics = ?filter.covered_topics(), "Subscription opened");
        Subscription::new(self.sender.subscribe(), filter, Arc::clone(&self.stats))
    }

    /// Live subscriptions of any kind.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Live subscriptions whose filter covers `topic`.
    #[must_use]
    pub fn listeners(&self, topic: EventTopic) -> usize {
        self.stats.listeners.lock().get(&topic).copied().unwrap_or(0)
    }

    /// Events that were published while nobody was subscribed.
    #[must_use]
    pub fn undelivered(&self) -> u64 {
        self.stats.undelivered.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: CourtEvent) -> usize {
        let topic = event.topic();
        let source = event.source_component();
        self.stats.published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(reached) => {
                debug!(?topic, source, reached, "Event published");
                reached
            }
            Err(_) => {
                self.stats.undelivered.fetch_add(1, Ordering::Relaxed);
                warn!(?topic, source, "Event published with no subscribers");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.stats.published.load(Ordering::Relaxed)
    }
}
