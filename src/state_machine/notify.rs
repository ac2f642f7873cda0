use tokio::sync::broadcast;

/// A single observed state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StateChange<S> {
    pub from: S,
    pub to: S,
    pub changed_at: chrono::DateTime<chrono::Utc>,
}

/// Broadcast channel carrying state transitions to view-layer subscribers.
#[derive(Debug, Clone)]
pub struct StateNotifier<S> {
    sender: broadcast::Sender<StateChange<S>>,
}

impl<S: Clone + Send + 'static> StateNotifier<S> {
    /// Create a new notifier with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a transition. Having no subscribers is acceptable; the state
    /// machines publish regardless of whether anyone is listening.
    pub fn publish(&self, from: S, to: S) {
        let change = StateChange {
            from,
            to,
            changed_at: chrono::Utc::now(),
        };
        let _ = self.sender.send(change);
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange<S>> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<S: Clone + Send + 'static> Default for StateNotifier<S> {
    fn default() -> Self {
        Self::new(64)
    }
}
