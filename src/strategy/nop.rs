use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::event::GameEvent;
use crate::hand::Hand;

use super::Strategy;

/// Always draws from the stock, never plays, and discards at random.
#[derive(Debug, Clone)]
pub struct Nop {
    rng: ChaCha8Rng,
}

impl Nop {
    /// Registered name.
    pub const NAME: &'static str = "nop";

    /// Creates the strategy with a seeded source for its discards.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Strategy for Nop {
    fn pick_up_cards(&mut self, _discard_pile: &[Card]) -> usize {
        0
    }

    fn play_cards(&mut self, _hand: &Hand) -> Vec<Card> {
        Vec::new()
    }

    fn discard(&mut self, hand: &Hand) -> Option<Card> {
        hand.cards().choose(&mut self.rng).copied()
    }

    fn on_game_event(&mut self, _event: &GameEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discards_a_held_card() {
        let hand = Hand::from_cards(["2H", "9S", "KD"].map(|t| t.parse::<Card>().unwrap()));
        let mut nop = Nop::new(1);
        assert_eq!(nop.pick_up_cards(&[]), 0);
        let card = nop.discard(&hand).unwrap();
        assert!(hand.contains(card));
        assert_eq!(nop.discard(&Hand::new()), None);
    }
}
