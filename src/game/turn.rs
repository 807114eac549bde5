use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{DiscardError, PickUpError, PlayError};
use crate::event::GameEvent;
use crate::hand::Hand;
use crate::meld::{MIN_MELD_SIZE, Meld, can_rummy};
use crate::player::PlayerId;

use super::{Game, GamePhase, TurnState};

/// Why a turn-gated operation was refused before any turn-state check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Gate {
    NoSuchPlayer,
    NotInProgress,
    NotCurrentPlayer,
}

impl From<Gate> for PickUpError {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::NoSuchPlayer => Self::NoSuchPlayer,
            Gate::NotInProgress => Self::NotInProgress,
            Gate::NotCurrentPlayer => Self::NotCurrentPlayer,
        }
    }
}

impl From<Gate> for PlayError {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::NoSuchPlayer => Self::NoSuchPlayer,
            Gate::NotInProgress => Self::NotInProgress,
            Gate::NotCurrentPlayer => Self::NotCurrentPlayer,
        }
    }
}

impl From<Gate> for DiscardError {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::NoSuchPlayer => Self::NoSuchPlayer,
            Gate::NotInProgress => Self::NotInProgress,
            Gate::NotCurrentPlayer => Self::NotCurrentPlayer,
        }
    }
}

/// Returns true iff `cards` holds some card twice.
pub(super) fn has_duplicates(cards: &[Card]) -> bool {
    let mut seen = HashSet::with_capacity(cards.len());
    !cards.iter().all(|card| seen.insert(*card))
}

impl Game {
    pub(super) fn ensure_player_turn(&self, player_id: PlayerId) -> Result<usize, Gate> {
        let index = usize::from(player_id);
        if index >= self.players.len() {
            return Err(Gate::NoSuchPlayer);
        }

        if self.phase != GamePhase::Active {
            return Err(Gate::NotInProgress);
        }

        if self.current != Some(player_id) {
            return Err(Gate::NotCurrentPlayer);
        }

        Ok(index)
    }

    /// Returns whether `cards` can be played as a whole: either as a new
    /// meld, or with every card extending the current aggregated melds.
    pub(super) fn is_playable(&self, cards: &[Card]) -> bool {
        if cards.is_empty() {
            return false;
        }
        if Meld::new(cards.to_vec()).kind().is_some() {
            return true;
        }
        let melds = self.aggregated_melds();
        cards.iter().all(|&card| can_rummy(card, &melds))
    }

    /// Returns whether `card` could be played if `taken` were added to `hand`.
    fn can_play_forced(&self, card: Card, hand: &Hand, taken: &[Card]) -> bool {
        let mut hypothetical = hand.clone();
        for &extra in taken {
            hypothetical.insert(extra);
        }

        if !hypothetical.contains(card) {
            return false;
        }

        // A meld must leave a card to discard; a three-card part of any
        // longer meld holding `card` does.
        if hypothetical.len() > MIN_MELD_SIZE
            && hypothetical.melds().iter().any(|meld| meld.contains(card))
        {
            return true;
        }

        can_rummy(card, &self.aggregated_melds())
    }

    /// Draws the top card of the stock into the current player's hand.
    ///
    /// If the stock is empty, every discard except the top card is shuffled
    /// into a new stock first. The drawn card is returned to the caller but
    /// left out of the published `PickUpStock` event.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown, the game is not running,
    /// it is not the player's turn, the player already picked up this turn,
    /// or there is no card left to draw even after reshuffling.
    pub fn pick_up_stock(&mut self, player_id: PlayerId) -> Result<Card, PickUpError> {
        let index = self.ensure_player_turn(player_id)?;

        if self.turn_state != TurnState::TurnStart {
            return Err(PickUpError::WrongTurnState);
        }

        if self.stock.is_empty() {
            if self.discard.len() < 2 {
                return Err(PickUpError::NoCards);
            }
            self.reshuffle_discard();
        }

        let card = self.stock.pop_top().ok_or(PickUpError::NoCards)?;
        self.players[index].hand.insert(card);
        self.turn_state = TurnState::PickedUpCards;
        self.check_conservation();

        tracing::debug!(player = player_id, "picked up from stock");
        tracing::trace!(player = player_id, %card, "stock card");
        self.publish(&GameEvent::PickUpStock { player: player_id });

        Ok(card)
    }

    fn reshuffle_discard(&mut self) {
        let Some(top) = self.discard.pop() else {
            return;
        };
        let rest = core::mem::replace(&mut self.discard, alloc::vec![top]);
        tracing::debug!(cards = rest.len(), "reshuffling discard pile into stock");
        self.stock = Deck::from_pile(rest);
        self.stock.shuffle(&mut self.rng);
    }

    /// Takes the top `n_cards` of the discard pile into the current player's hand.
    ///
    /// The bottom-most card taken must be playable with the resulting hand,
    /// either in a new meld or as a rummy off the aggregated melds. It must
    /// be played before the player may discard.
    ///
    /// Returns the cards taken, bottom-most first.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown, the game is not running,
    /// it is not the player's turn, the player already picked up this turn,
    /// `n_cards` is zero or exceeds the discard pile, or the bottom card
    /// taken could not be played.
    pub fn pick_up_discard(
        &mut self,
        player_id: PlayerId,
        n_cards: usize,
    ) -> Result<Vec<Card>, PickUpError> {
        let index = self.ensure_player_turn(player_id)?;

        if self.turn_state != TurnState::TurnStart {
            return Err(PickUpError::WrongTurnState);
        }

        if n_cards == 0 || n_cards > self.discard.len() {
            return Err(PickUpError::InvalidPickupCount);
        }

        let bottom = self.discard.len() - n_cards;
        let taken = self.discard[bottom..].to_vec();
        let forced = taken[0];
        if !self.can_play_forced(forced, &self.players[index].hand, &taken) {
            return Err(PickUpError::UnplayableForcedCard);
        }

        self.discard.truncate(bottom);
        let hand = &mut self.players[index].hand;
        for &card in &taken {
            hand.insert(card);
        }
        self.must_play = Some(forced);
        self.turn_state = TurnState::PickedUpCards;
        self.check_conservation();

        tracing::debug!(player = player_id, n_cards, %forced, "picked up from discard pile");
        self.publish(&GameEvent::PickUpDiscard {
            player: player_id,
            cards: taken.clone(),
        });

        Ok(taken)
    }

    /// Plays cards from the current player's hand.
    ///
    /// The cards must either form a new set or run on their own, or each
    /// extend one of the aggregated melds as a rummy. A new meld takes
    /// precedence when both hold. At least one card must stay in hand for
    /// the discard. May be called any number of times after picking up.
    ///
    /// Returns the point value of the play.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown, the game is not running,
    /// it is not the player's turn, nothing has been picked up yet, the play
    /// is empty or uses the whole hand, a card is not held or repeated, or
    /// the cards are neither a meld nor rummies.
    pub fn play_cards(&mut self, player_id: PlayerId, cards: &[Card]) -> Result<i32, PlayError> {
        let index = self.ensure_player_turn(player_id)?;

        if self.turn_state == TurnState::TurnStart {
            return Err(PlayError::WrongTurnState);
        }

        let hand = &self.players[index].hand;
        if cards.is_empty() || cards.len() >= hand.len() {
            return Err(PlayError::HandTooSmall);
        }

        if cards.iter().any(|&card| !hand.contains(card)) {
            return Err(PlayError::CardNotInHand);
        }

        if has_duplicates(cards) {
            return Err(PlayError::DuplicateCardInRequest);
        }

        let meld = Meld::new(cards.to_vec());
        let is_meld = meld.kind().is_some();
        if !is_meld && !self.is_playable(cards) {
            return Err(PlayError::InvalidMeldOrRummy);
        }

        let score = meld.value();
        let player = &mut self.players[index];
        for &card in cards {
            player.hand.remove(card);
        }
        if self.must_play.is_some_and(|forced| cards.contains(&forced)) {
            self.must_play = None;
        }
        if is_meld {
            player.melds.push(meld.arranged());
        } else {
            player.rummies.extend_from_slice(cards);
        }
        self.turn_state = TurnState::PlayedCards;
        self.check_conservation();

        tracing::debug!(player = player_id, cards = cards.len(), score, is_meld, "played cards");
        self.publish(&GameEvent::PlayCards {
            player: player_id,
            cards: cards.to_vec(),
            score,
        });

        Ok(score)
    }

    /// Discards a card, ending the current player's turn.
    ///
    /// If the hand is now empty the game is over: `GameOver` is published and
    /// every subscription is closed. Otherwise the turn passes to the next
    /// player in join order.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is unknown, the game is not running,
    /// it is not the player's turn, nothing has been picked up yet, a card
    /// taken from the discard pile has not been played, or the card is not
    /// in hand.
    pub fn discard_card(&mut self, player_id: PlayerId, card: Card) -> Result<(), DiscardError> {
        let index = self.ensure_player_turn(player_id)?;

        if self.turn_state == TurnState::TurnStart {
            return Err(DiscardError::WrongTurnState);
        }

        if self.must_play.is_some() {
            return Err(DiscardError::ForcedCardPending);
        }

        let hand = &mut self.players[index].hand;
        if !hand.remove(card) {
            return Err(DiscardError::CardNotInHand);
        }
        let went_out = hand.is_empty();
        self.discard.push(card);
        self.check_conservation();

        tracing::debug!(player = player_id, %card, "discarded");
        self.publish(&GameEvent::Discard {
            player: player_id,
            card,
        });

        if went_out {
            self.end_game();
        } else {
            self.next_player(index);
        }

        Ok(())
    }

    fn next_player(&mut self, index: usize) {
        let next = PlayerId::try_from((index + 1) % self.players.len()).unwrap_or_default();
        self.turn += 1;
        self.current = Some(next);
        self.turn_state = TurnState::TurnStart;
        self.publish(&GameEvent::TurnStart { player: next });
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::Over;
        self.current = None;
        self.must_play = None;
        tracing::info!(turn = self.turn, "game over");
        self.publish(&GameEvent::GameOver);
        self.subscribers.close_all();
    }
}
