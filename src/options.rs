//! Game configuration options.

/// What a full subscriber queue does with a newly published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum OverflowPolicy {
    /// Evict the oldest queued event to make room.
    #[default]
    DropOldest,
    /// Keep the queue as is and drop the new event.
    DropNewest,
}

/// Configuration options for a Rummy 500 game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use rummy500::{GameOptions, OverflowPolicy};
///
/// let options = GameOptions::default()
///     .with_event_capacity(64)
///     .with_overflow(OverflowPolicy::DropNewest);
/// assert_eq!(options.hand_size, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Cards dealt to each player.
    pub hand_size: usize,
    /// Maximum number of undelivered events held per subscriber.
    pub event_capacity: usize,
    /// Behaviour when a subscriber's queue is full.
    pub overflow: OverflowPolicy,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            hand_size: 7,
            event_capacity: 1000,
            overflow: OverflowPolicy::DropOldest,
        }
    }
}

impl GameOptions {
    /// Sets the number of cards dealt to each player.
    ///
    /// # Example
    ///
    /// ```
    /// use rummy500::GameOptions;
    ///
    /// let options = GameOptions::default().with_hand_size(10);
    /// assert_eq!(options.hand_size, 10);
    /// ```
    #[must_use]
    pub const fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Sets the per-subscriber queue bound. A capacity of zero is treated as one.
    #[must_use]
    pub const fn with_event_capacity(mut self, event_capacity: usize) -> Self {
        self.event_capacity = event_capacity;
        self
    }

    /// Sets the overflow policy for full subscriber queues.
    #[must_use]
    pub const fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }
}
