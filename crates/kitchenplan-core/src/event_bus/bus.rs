//! Layout event bus implementation.
//!
//! Synchronous handlers run on the publishing thread, in subscription
//! order, before `publish` returns. They run without the handler lock held,
//! so a handler may subscribe or unsubscribe on the same bus. A broadcast
//! channel mirrors every event for async consumers.

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EventCategory, LayoutEvent};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &LayoutEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Arc<dyn Fn(&LayoutEvent) + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct LayoutEventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
    /// Whether to keep event history.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
}

impl Default for LayoutEventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            enable_history: false,
            max_history_size: 500,
        }
    }
}

/// Error types for event bus operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Publish/subscribe hub that keeps both views in step with the model
pub struct LayoutEventBus {
    sender: broadcast::Sender<LayoutEvent>,
    // Vec keeps delivery in subscription order
    handlers: Arc<RwLock<Vec<(SubscriptionId, EventFilter, EventHandler)>>>,
    history: Arc<RwLock<VecDeque<LayoutEvent>>>,
    config: LayoutEventBusConfig,
}

impl LayoutEventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(LayoutEventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: LayoutEventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: Arc::new(RwLock::new(Vec::new())),
            history: Arc::new(RwLock::new(VecDeque::new())),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of handlers and receivers that saw the event.
    pub fn publish(&self, event: LayoutEvent) -> Result<usize, EventBusError> {
        tracing::trace!("Publishing: {}", event.description());

        if self.config.enable_history {
            self.add_to_history(&event);
        }

        // Snapshot matching handlers; changes made while delivering apply
        // from the next publish on
        let matching: Vec<EventHandler> = self
            .handlers
            .read()
            .iter()
            .filter(|(_, filter, _)| filter.matches(&event))
            .map(|(_, _, handler)| Arc::clone(handler))
            .collect();

        let delivered = matching.len();
        for handler in matching {
            handler(&event);
        }

        match self.sender.send(event) {
            Ok(count) => Ok(delivered + count),
            Err(_) if delivered > 0 => Ok(delivered),
            Err(_) => {
                if self.handlers.read().is_empty() {
                    Err(EventBusError::NoSubscribers)
                } else {
                    Ok(0)
                }
            }
        }
    }

    /// Subscribe to events with a synchronous handler
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&LayoutEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().push((id, filter, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for async polling
    pub fn receiver(&self) -> broadcast::Receiver<LayoutEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub, _, _)| *sub != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Recent events, oldest first (empty unless history is enabled)
    pub fn history(&self) -> Vec<LayoutEvent> {
        self.history.read().iter().cloned().collect()
    }

    /// Clear event history
    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    /// Get the current configuration
    pub fn config(&self) -> &LayoutEventBusConfig {
        &self.config
    }

    fn add_to_history(&self, event: &LayoutEvent) {
        let mut history = self.history.write();
        history.push_back(event.clone());
        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl Default for LayoutEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LayoutEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
