//! Game events and subscriber queues.
//!
//! Every accepted state change is published to each subscriber's bounded
//! queue. Publishing never blocks: a full queue applies the game's
//! [`OverflowPolicy`] and counts what it dropped.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::card::Card;
use crate::options::OverflowPolicy;
use crate::player::PlayerId;
use crate::sync::Mutex;

/// The type of a [`GameEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEventKind {
    /// A player's turn begins.
    TurnStart,
    /// A player drew from the stock.
    PickUpStock,
    /// A player took cards from the discard pile.
    PickUpDiscard,
    /// A player played a meld or rummies.
    PlayCards,
    /// A player discarded, ending their turn.
    Discard,
    /// A player claimed discard-pile cards out of turn.
    CallRummy,
    /// The game ended.
    GameOver,
}

/// A published change to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// `player` is now the current player.
    TurnStart {
        /// The player whose turn begins.
        player: PlayerId,
    },
    /// `player` drew the top of the stock. The card is private.
    PickUpStock {
        /// The player who drew.
        player: PlayerId,
    },
    /// `player` took `cards` from the discard pile, bottom-most first.
    PickUpDiscard {
        /// The player who picked up.
        player: PlayerId,
        /// The cards taken.
        cards: Vec<Card>,
    },
    /// `player` played `cards` worth `score` points.
    PlayCards {
        /// The player who played.
        player: PlayerId,
        /// The cards played.
        cards: Vec<Card>,
        /// Point value of the play.
        score: i32,
    },
    /// `player` discarded `card`.
    Discard {
        /// The player who discarded.
        player: PlayerId,
        /// The discarded card.
        card: Card,
    },
    /// `player` claimed `cards` from the discard pile as rummies.
    CallRummy {
        /// The player who called rummy.
        player: PlayerId,
        /// The cards claimed.
        cards: Vec<Card>,
        /// Point value of the claim.
        score: i32,
    },
    /// The game is over. No further events follow.
    GameOver,
}

impl GameEvent {
    /// Returns the event type.
    #[must_use]
    pub const fn kind(&self) -> GameEventKind {
        match self {
            Self::TurnStart { .. } => GameEventKind::TurnStart,
            Self::PickUpStock { .. } => GameEventKind::PickUpStock,
            Self::PickUpDiscard { .. } => GameEventKind::PickUpDiscard,
            Self::PlayCards { .. } => GameEventKind::PlayCards,
            Self::Discard { .. } => GameEventKind::Discard,
            Self::CallRummy { .. } => GameEventKind::CallRummy,
            Self::GameOver => GameEventKind::GameOver,
        }
    }

    /// Returns the acting player, if any.
    #[must_use]
    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Self::TurnStart { player }
            | Self::PickUpStock { player }
            | Self::PickUpDiscard { player, .. }
            | Self::PlayCards { player, .. }
            | Self::Discard { player, .. }
            | Self::CallRummy { player, .. } => Some(*player),
            Self::GameOver => None,
        }
    }

    /// Returns the public cards carried by the event.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::PickUpDiscard { cards, .. }
            | Self::PlayCards { cards, .. }
            | Self::CallRummy { cards, .. } => cards,
            Self::Discard { card, .. } => core::slice::from_ref(card),
            Self::TurnStart { .. } | Self::PickUpStock { .. } | Self::GameOver => &[],
        }
    }

    /// Returns the score carried by the event.
    #[must_use]
    pub const fn score(&self) -> Option<i32> {
        match self {
            Self::PlayCards { score, .. } | Self::CallRummy { score, .. } => Some(*score),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Queue {
    events: VecDeque<GameEvent>,
    closed: bool,
    dropped: usize,
}

/// The receiving end of a game subscription.
///
/// Events are delivered in publication order. Once the game is over the
/// receiver is closed; events already queued can still be read.
pub struct EventReceiver {
    queue: Arc<Mutex<Queue>>,
}

impl EventReceiver {
    fn closed() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue {
                closed: true,
                ..Queue::default()
            })),
        }
    }

    /// Takes the next queued event, if any.
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.queue.lock().events.pop_front()
    }

    /// Takes every queued event.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.queue.lock().events.drain(..).collect()
    }

    /// Returns the number of queued events.
    pub fn len(&self) -> usize {
        self.queue.lock().events.len()
    }

    /// Returns whether no events are queued.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().events.is_empty()
    }

    /// Returns whether the game has closed this subscription.
    pub fn is_closed(&self) -> bool {
        self.queue.lock().closed
    }

    /// Returns whether the subscription is closed and fully drained.
    pub fn is_finished(&self) -> bool {
        let queue = self.queue.lock();
        queue.closed && queue.events.is_empty()
    }

    /// Returns how many events were lost to overflow.
    pub fn dropped(&self) -> usize {
        self.queue.lock().dropped
    }
}

impl core::fmt::Debug for EventReceiver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventReceiver").finish_non_exhaustive()
    }
}

/// The publishing side held by the game.
pub(crate) struct Subscribers {
    sinks: Vec<Arc<Mutex<Queue>>>,
    capacity: usize,
    overflow: OverflowPolicy,
}

impl Subscribers {
    pub(crate) fn new(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            sinks: Vec::new(),
            capacity: capacity.max(1),
            overflow,
        }
    }

    pub(crate) fn subscribe(&mut self, game_over: bool) -> EventReceiver {
        if game_over {
            return EventReceiver::closed();
        }
        let queue = Arc::new(Mutex::new(Queue::default()));
        self.sinks.push(Arc::clone(&queue));
        EventReceiver { queue }
    }

    pub(crate) fn len(&self) -> usize {
        self.sinks.len()
    }

    pub(crate) fn publish(&mut self, event: &GameEvent) {
        // A sink only referenced here has lost its receiver.
        self.sinks.retain(|sink| Arc::strong_count(sink) > 1);

        for (index, sink) in self.sinks.iter().enumerate() {
            let mut queue = sink.lock();
            if queue.events.len() >= self.capacity {
                queue.dropped += 1;
                tracing::warn!(
                    subscriber = index,
                    kind = ?event.kind(),
                    policy = ?self.overflow,
                    "subscriber queue full"
                );
                match self.overflow {
                    OverflowPolicy::DropOldest => {
                        queue.events.pop_front();
                    }
                    OverflowPolicy::DropNewest => continue,
                }
            }
            queue.events.push_back(event.clone());
        }
    }

    pub(crate) fn close_all(&mut self) {
        for sink in self.sinks.drain(..) {
            sink.lock().closed = true;
        }
    }
}
