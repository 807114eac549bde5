use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::event::GameEvent;
use crate::hand::Hand;
use crate::meld::Meld;

use super::Strategy;

/// Takes from the discard pile whenever the forced card completes a meld,
/// plays every meld it holds, and discards at random.
#[derive(Debug, Clone)]
pub struct Greedy {
    /// Hand as of the end of our last turn.
    current_hand: Hand,
    /// Bottom card taken from the discard pile, until we play it.
    must_play: Option<Card>,
    rng: ChaCha8Rng,
}

impl Greedy {
    /// Registered name.
    pub const NAME: &'static str = "greedy";

    /// Creates the strategy with a seeded source for its discards.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            current_hand: Hand::new(),
            must_play: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn playable(meld: &Meld, hand: &Hand) -> bool {
        meld.len() < hand.len()
    }
}

impl Strategy for Greedy {
    fn pick_up_cards(&mut self, discard_pile: &[Card]) -> usize {
        for n in 1..=discard_pile.len() {
            let taken = &discard_pile[discard_pile.len() - n..];
            let bottom = taken[0];
            let mut hypothetical = self.current_hand.clone();
            for &card in taken {
                hypothetical.insert(card);
            }

            if hypothetical
                .melds()
                .iter()
                .any(|meld| meld.contains(bottom) && Self::playable(meld, &hypothetical))
            {
                self.must_play = Some(bottom);
                return n;
            }
        }

        self.must_play = None;
        0
    }

    fn play_cards(&mut self, hand: &Hand) -> Vec<Card> {
        let melds = hand.melds();
        let forced = self.must_play.and_then(|card| {
            melds
                .iter()
                .find(|meld| meld.contains(card) && Self::playable(meld, hand))
        });
        let Some(meld) = forced.or_else(|| melds.iter().find(|meld| Self::playable(meld, hand)))
        else {
            return Vec::new();
        };

        if self.must_play.is_some_and(|card| meld.contains(card)) {
            self.must_play = None;
        }
        let mut remaining = hand.clone();
        for &card in meld.cards() {
            remaining.remove(card);
        }
        self.current_hand = remaining;
        meld.cards().to_vec()
    }

    fn discard(&mut self, hand: &Hand) -> Option<Card> {
        let card = hand.cards().choose(&mut self.rng).copied()?;
        let mut remaining = hand.clone();
        remaining.remove(card);
        self.current_hand = remaining;
        Some(card)
    }

    fn on_game_event(&mut self, _event: &GameEvent) {}
}
