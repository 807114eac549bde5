use crate::card::Card;
use crate::error::RummyError;
use crate::event::GameEvent;
use crate::player::PlayerId;

use super::turn::has_duplicates;
use super::{Game, GamePhase};

impl Game {
    /// Claims cards from the discard pile out of turn.
    ///
    /// Any player may call rummy at any point while the game is running,
    /// regardless of whose turn it is. The cards must all be in the discard
    /// pile and, taken together, form a new meld or extend the aggregated
    /// melds. They are added to the caller's rummies.
    ///
    /// Returns the point value of the claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown, the game is not running,
    /// a card is repeated or not in the discard pile, or the cards cannot be
    /// played.
    pub fn call_rummy(&mut self, player_id: PlayerId, cards: &[Card]) -> Result<i32, RummyError> {
        let index = usize::from(player_id);
        if index >= self.players.len() {
            return Err(RummyError::NoSuchPlayer);
        }

        if self.phase != GamePhase::Active {
            return Err(RummyError::NotInProgress);
        }

        if has_duplicates(cards) {
            return Err(RummyError::DuplicateCardInRequest);
        }

        if cards.iter().any(|card| !self.discard.contains(card)) {
            return Err(RummyError::CardNotInDiscard);
        }

        if !self.is_playable(cards) {
            return Err(RummyError::InvalidMeldOrRummy);
        }

        self.discard.retain(|card| !cards.contains(card));
        self.players[index].rummies.extend_from_slice(cards);
        self.check_conservation();

        let score: i32 = cards.iter().map(|card| card.value()).sum();
        tracing::debug!(player = player_id, cards = cards.len(), score, "rummy called");
        self.publish(&GameEvent::CallRummy {
            player: player_id,
            cards: cards.to_vec(),
            score,
        });

        Ok(score)
    }
}
