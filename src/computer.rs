//! Drives strategies through whole turns.

use alloc::boxed::Box;

use crate::error::{DiscardError, JoinError, PickUpError, TurnError};
use crate::event::{EventReceiver, GameEvent};
use crate::game::Game;
use crate::hand::Hand;
use crate::player::PlayerId;
use crate::strategy::Strategy;

/// A seat played by a [`Strategy`].
///
/// The player subscribes when it joins, so it sees the `TurnStart` that
/// `deal` publishes. Call [`poll`](Self::poll) to let it react to events.
pub struct ComputerPlayer {
    id: PlayerId,
    strategy: Box<dyn Strategy + Send>,
    events: EventReceiver,
}

impl ComputerPlayer {
    /// Joins `game` under `name` and subscribes to its events.
    ///
    /// # Errors
    ///
    /// Returns an error if the player cannot join.
    pub fn join(
        game: &mut Game,
        name: &str,
        strategy: Box<dyn Strategy + Send>,
    ) -> Result<Self, JoinError> {
        let id = game.add_player(name)?;
        let events = game.subscribe();
        Ok(Self {
            id,
            strategy,
            events,
        })
    }

    /// Returns this player's ID.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Returns whether the game has ended and every event has been handled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.events.is_finished()
    }

    /// Handles queued events, playing at most one turn.
    ///
    /// Other players' events go to the strategy. Returns `true` if a turn
    /// was played; events after that turn stay queued for the next poll.
    ///
    /// # Errors
    ///
    /// Returns an error if a game operation made on the strategy's behalf fails.
    pub fn poll(&mut self, game: &mut Game) -> Result<bool, TurnError> {
        while let Some(event) = self.events.try_recv() {
            if event.player() != Some(self.id) {
                self.strategy.on_game_event(&event);
                continue;
            }
            if matches!(event, GameEvent::TurnStart { .. }) && game.current_player() == Some(self.id) {
                self.play_turn(game)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Plays one full turn: pick up, play until the strategy stops, discard.
    ///
    /// A discard-pile pickup the game refuses falls back to the stock.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not this player's turn or a game operation fails.
    pub fn play_turn(&mut self, game: &mut Game) -> Result<(), TurnError> {
        if game.current_player() != Some(self.id) {
            return Err(TurnError::NotYourTurn);
        }

        let n_cards = self.strategy.pick_up_cards(game.discard_pile());
        tracing::debug!(player = self.id, n_cards, "strategy chose pick up");
        if n_cards == 0 {
            game.pick_up_stock(self.id)?;
        } else {
            match game.pick_up_discard(self.id, n_cards) {
                Ok(_) => {}
                Err(PickUpError::UnplayableForcedCard | PickUpError::InvalidPickupCount) => {
                    tracing::debug!(player = self.id, "discard pick up refused, drawing from stock");
                    game.pick_up_stock(self.id)?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        loop {
            let hand = Hand::from_cards(game.hand(self.id)?);
            let cards = self.strategy.play_cards(&hand);
            if cards.is_empty() {
                break;
            }
            tracing::debug!(player = self.id, cards = cards.len(), "strategy chose play");
            game.play_cards(self.id, &cards)?;
        }

        let hand = Hand::from_cards(game.hand(self.id)?);
        let card = self
            .strategy
            .discard(&hand)
            .ok_or(TurnError::Discard(DiscardError::CardNotInHand))?;
        tracing::debug!(player = self.id, %card, "strategy chose discard");
        game.discard_card(self.id, card)?;
        Ok(())
    }
}

/// Runs a dealt game of computer players until it ends or `max_turns` turns
/// have been completed.
///
/// Returns whether the game finished. Stops early if no player can act,
/// for example when the current seat is not one of `players`, or when the
/// stock is empty and the discard pile cannot refill it.
///
/// # Errors
///
/// Returns the first error a computer player hits.
pub fn play_game(
    game: &mut Game,
    players: &mut [ComputerPlayer],
    max_turns: u32,
) -> Result<bool, TurnError> {
    'turns: loop {
        let mut progressed = false;
        for player in players.iter_mut() {
            if game.is_over() || game.turn() >= max_turns {
                break 'turns;
            }
            match player.poll(game) {
                Ok(played) => progressed |= played,
                Err(TurnError::PickUp(PickUpError::NoCards)) => {
                    tracing::warn!(turn = game.turn(), "no cards left to draw, stopping");
                    break 'turns;
                }
                Err(err) => return Err(err),
            }
        }
        if !progressed {
            break;
        }
    }

    if game.is_over() {
        // Let every seat see the end of the game.
        for player in players.iter_mut() {
            player.poll(game)?;
        }
    }
    Ok(game.is_over())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GameOptions;
    use crate::strategy::{Greedy, Nop};

    #[test]
    fn nop_players_take_turns_in_order() {
        let mut game = Game::new(GameOptions::default(), 5);
        let mut players = [
            ComputerPlayer::join(&mut game, "a", Box::new(Nop::new(1))).unwrap(),
            ComputerPlayer::join(&mut game, "b", Box::new(Nop::new(2))).unwrap(),
        ];
        game.deal().unwrap();

        let finished = play_game(&mut game, &mut players, 10).unwrap();
        assert!(!finished);
        assert_eq!(game.turn(), 10);
        assert_eq!(game.hand(0).unwrap().len(), 7);
        assert_eq!(game.hand(1).unwrap().len(), 7);
    }

    #[test]
    fn turn_out_of_order_is_refused() {
        let mut game = Game::new(GameOptions::default(), 5);
        let mut a = ComputerPlayer::join(&mut game, "a", Box::new(Greedy::new(1))).unwrap();
        let mut b = ComputerPlayer::join(&mut game, "b", Box::new(Greedy::new(2))).unwrap();
        game.deal().unwrap();

        let idle = if game.current_player() == Some(a.id()) { &mut b } else { &mut a };
        assert_eq!(idle.play_turn(&mut game), Err(TurnError::NotYourTurn));
    }

    #[test]
    fn single_seat_goes_out_with_empty_deal() {
        let options = GameOptions::default().with_hand_size(0);
        let mut game = Game::new(options, 5);
        let mut players = [ComputerPlayer::join(&mut game, "solo", Box::new(Nop::new(1))).unwrap()];
        game.deal().unwrap();

        assert!(play_game(&mut game, &mut players, 5).unwrap());
        assert!(players[0].is_finished());
    }
}
