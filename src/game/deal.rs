use rand::Rng;

use crate::card::DECK_SIZE;
use crate::error::DealError;
use crate::event::GameEvent;
use crate::player::PlayerId;

use super::{Game, GamePhase, TurnState};

impl Game {
    /// Starts the game: deals a hand to each player in join order, turns up
    /// the first discard, and picks a random player to go first.
    ///
    /// Publishes `TurnStart` for the starting player.
    ///
    /// # Errors
    ///
    /// Returns an error if the game has already started, nobody has joined,
    /// or one deck cannot cover every hand plus the first discard.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.phase != GamePhase::Forming {
            return Err(DealError::GameAlreadyStarted);
        }

        if self.players.is_empty() {
            return Err(DealError::NoPlayers);
        }

        let hand_size = self.options.hand_size;
        let cards_needed = self
            .players
            .len()
            .checked_mul(hand_size)
            .and_then(|cards| cards.checked_add(1));
        if cards_needed.is_none_or(|cards| cards > DECK_SIZE) {
            return Err(DealError::DeckTooSmallForPlayers);
        }

        if self.shuffle_on_deal {
            self.stock.shuffle(&mut self.rng);
        }

        tracing::info!(
            players = self.players.len(),
            hand_size,
            "dealing"
        );
        for player in &mut self.players {
            for _ in 0..hand_size {
                if let Some(card) = self.stock.pop_top() {
                    player.hand.insert(card);
                }
            }
            tracing::trace!(name = player.name(), hand = %player.hand, "initial hand");
        }

        self.discard.extend(self.stock.pop_top());

        let start = self.rng.random_range(0..self.players.len());
        let start = PlayerId::try_from(start).unwrap_or_default();
        self.phase = GamePhase::Active;
        self.current = Some(start);
        self.turn_state = TurnState::TurnStart;
        self.check_conservation();

        self.publish(&GameEvent::TurnStart { player: start });
        Ok(())
    }
}
