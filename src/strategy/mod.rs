//! Automated players.
//!
//! A [`Strategy`] makes the decisions for one seat. It never calls the game
//! itself; [`ComputerPlayer`](crate::ComputerPlayer) consults it and issues
//! the game operations on its behalf.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::card::Card;
use crate::event::GameEvent;
use crate::hand::Hand;

mod greedy;
mod nop;

pub use greedy::Greedy;
pub use nop::Nop;

/// Decision-making for an automated player.
pub trait Strategy {
    /// Chooses where to draw from.
    ///
    /// Returns 0 to draw from the stock, or `n > 0` to take the top `n`
    /// cards of `discard_pile` (given bottom first). The bottom-most card
    /// taken must be played this turn.
    fn pick_up_cards(&mut self, discard_pile: &[Card]) -> usize;

    /// Chooses cards from `hand` to play as a meld or as rummies.
    ///
    /// Returns an empty list to stop playing this turn.
    fn play_cards(&mut self, hand: &Hand) -> Vec<Card>;

    /// Chooses the card to discard. Returns `None` only for an empty hand.
    fn discard(&mut self, hand: &Hand) -> Option<Card>;

    /// Observes an event published by another player. A strategy is never
    /// told about its own actions.
    fn on_game_event(&mut self, event: &GameEvent);
}

/// Named constructor for a built-in strategy.
pub struct StrategyFactory {
    /// Stable strategy name.
    pub name: &'static str,
    /// Builds a strategy from a seed for its random choices.
    pub make: fn(seed: u64) -> Box<dyn Strategy + Send>,
}

static STRATEGIES: &[StrategyFactory] = &[
    StrategyFactory {
        name: Nop::NAME,
        make: make_nop,
    },
    StrategyFactory {
        name: Greedy::NAME,
        make: make_greedy,
    },
];

/// Returns every registered strategy.
#[must_use]
pub fn registered() -> &'static [StrategyFactory] {
    STRATEGIES
}

/// Finds a registered strategy by name.
#[must_use]
pub fn by_name(name: &str) -> Option<&'static StrategyFactory> {
    registered().iter().find(|factory| factory.name == name)
}

fn make_nop(seed: u64) -> Box<dyn Strategy + Send> {
    Box::new(Nop::new(seed))
}

fn make_greedy(seed: u64) -> Box<dyn Strategy + Send> {
    Box::new(Greedy::new(seed))
}
