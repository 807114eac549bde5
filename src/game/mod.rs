//! Game engine and state management.

use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE};
use crate::deck::Deck;
use crate::error::{JoinError, PlayerError};
use crate::event::{EventReceiver, GameEvent, Subscribers};
use crate::meld::Meld;
use crate::options::GameOptions;
use crate::player::{Player, PlayerId};
use crate::snapshot::{GameSnapshot, PlayerSnapshot};

mod aggregate;
mod deal;
mod rummy;
pub mod state;
mod turn;

pub use state::{GamePhase, TurnState};

/// A Rummy 500 game: the stock, the discard pile, every player's hand and
/// plays, and the turn cursor.
///
/// The game does no locking of its own. Callers that share a game between
/// threads must serialize access to it, for example behind a mutex as
/// [`GameRegistry`](crate::GameRegistry) does.
///
/// # Example
///
/// ```
/// use rummy500::{Game, GameOptions, GameEvent};
///
/// let mut game = Game::new(GameOptions::default(), 42);
/// let events = game.subscribe();
/// let alice = game.add_player("alice").unwrap();
/// let bob = game.add_player("bob").unwrap();
/// game.deal().unwrap();
///
/// let first = game.current_player().unwrap();
/// assert!(first == alice || first == bob);
/// assert_eq!(events.try_recv(), Some(GameEvent::TurnStart { player: first }));
/// assert_eq!(game.stock_count(), 52 - 2 * 7 - 1);
/// ```
pub struct Game {
    /// Game options.
    options: GameOptions,
    /// Cards not yet drawn. The top is the last card.
    stock: Deck,
    /// Discard pile. The top is the last card.
    discard: Vec<Card>,
    /// Players in join order; a player's id is its index.
    players: Vec<Player>,
    /// Current game phase.
    phase: GamePhase,
    /// Player whose turn it is while the game is active.
    current: Option<PlayerId>,
    /// Progress within the current turn.
    turn_state: TurnState,
    /// Completed turns.
    turn: u32,
    /// Bottom card taken from the discard pile this turn, until it is played.
    must_play: Option<Card>,
    /// Whether `deal` shuffles the stock first.
    shuffle_on_deal: bool,
    /// Event queues of everyone watching.
    subscribers: Subscribers,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl Game {
    /// Creates a new game with the given seed. The deck is shuffled when
    /// the cards are dealt.
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::build(options, seed, Deck::new(), true)
    }

    /// Creates a game whose stock is dealt in exactly the order of `deck`.
    ///
    /// The deck is not shuffled on deal, so the last card of `deck` is the
    /// first card dealt. The seed still picks the starting player and drives
    /// any later reshuffle of the discard pile.
    #[must_use]
    pub fn with_deck(options: GameOptions, seed: u64, deck: Deck) -> Self {
        Self::build(options, seed, deck, false)
    }

    fn build(options: GameOptions, seed: u64, stock: Deck, shuffle_on_deal: bool) -> Self {
        let subscribers = Subscribers::new(options.event_capacity, options.overflow);
        Self {
            options,
            stock,
            discard: Vec::new(),
            players: Vec::new(),
            phase: GamePhase::Forming,
            current: None,
            turn_state: TurnState::TurnStart,
            turn: 0,
            must_play: None,
            shuffle_on_deal,
            subscribers,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Adds a player to the game.
    ///
    /// Returns the assigned player ID, counting from zero in join order.
    ///
    /// # Errors
    ///
    /// Returns an error if cards have been dealt, if the name is taken, or if
    /// no more ids are available.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, JoinError> {
        if self.phase != GamePhase::Forming {
            return Err(JoinError::GameAlreadyStarted);
        }

        if self.players.iter().any(|player| player.name() == name) {
            return Err(JoinError::DuplicatePlayerName);
        }

        let id = PlayerId::try_from(self.players.len()).map_err(|_| JoinError::TooManyPlayers)?;
        self.players.push(Player::new(String::from(name)));
        tracing::debug!(player = id, name, "player joined");
        Ok(id)
    }

    /// Registers a new subscriber.
    ///
    /// A subscription taken after the game is over is already closed and
    /// receives nothing.
    pub fn subscribe(&mut self) -> EventReceiver {
        self.subscribers.subscribe(self.phase == GamePhase::Over)
    }

    fn publish(&mut self, event: &GameEvent) {
        self.subscribers.publish(event);
    }

    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current game phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns whether a player has gone out.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    /// Returns the progress of the current turn.
    #[must_use]
    pub const fn turn_state(&self) -> TurnState {
        self.turn_state
    }

    /// Returns the number of completed turns.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the player ID whose turn it is.
    ///
    /// Returns `None` before dealing and after the game is over.
    #[must_use]
    pub const fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    /// Returns the card the current player must still play this turn.
    #[must_use]
    pub const fn must_play_card(&self) -> Option<Card> {
        self.must_play
    }

    /// Returns the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the player with the given ID.
    #[must_use]
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.get(usize::from(player_id))
    }

    /// Looks up a player ID by name.
    #[must_use]
    pub fn player_id(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|player| player.name() == name)
            .and_then(|index| PlayerId::try_from(index).ok())
    }

    /// Returns the number of cards remaining in the stock.
    #[must_use]
    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    /// Returns the discard pile, bottom first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// Returns a player's hand sorted by suit and rank.
    ///
    /// This is private information; only that player should see it.
    ///
    /// # Errors
    ///
    /// Returns an error if the player ID is unknown.
    pub fn hand(&self, player_id: PlayerId) -> Result<Vec<Card>, PlayerError> {
        self.player(player_id)
            .map(|player| player.hand().sorted())
            .ok_or(PlayerError::NoSuchPlayer)
    }

    /// Returns the publicly observable state of the game.
    ///
    /// Scores are public scores while the game runs and final scores once
    /// it is over.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let is_over = self.is_over();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerSnapshot {
                id: PlayerId::try_from(index).unwrap_or(PlayerId::MAX),
                name: String::from(player.name()),
                melds: player.melds().to_vec(),
                rummies: player.rummies().to_vec(),
                hand_size: player.hand().len(),
                score: if is_over {
                    player.final_score()
                } else {
                    player.public_score()
                },
            })
            .collect();

        GameSnapshot {
            stock_count: self.stock.len(),
            discard_pile: self.discard.clone(),
            aggregated_melds: self.aggregated_melds(),
            players,
            turn: self.turn,
            current_player: self.current,
            turn_state: self.turn_state,
            phase: self.phase,
            is_over,
        }
    }

    /// Every played meld extended with the rummies played off it.
    ///
    /// Computed from the live plays on every call.
    #[must_use]
    pub fn aggregated_melds(&self) -> Vec<Meld> {
        aggregate::aggregate(&self.players)
    }

    fn card_total(&self) -> usize {
        self.stock.len()
            + self.discard.len()
            + self.players.iter().map(Player::card_count).sum::<usize>()
    }

    fn check_conservation(&self) {
        debug_assert_eq!(self.card_total(), DECK_SIZE, "cards were created or lost");
    }
}
