//! The 52-card deck used as the stock.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::DeckError;

/// An ordered pile of cards. The top of the deck is the last element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates the full deck in canonical (suit, rank) order.
    #[must_use]
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Builds a stacked deck from an explicit order.
    ///
    /// The cards must be a permutation of the full deck. The last card is
    /// drawn first.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck does not hold exactly 52 cards or if a
    /// card appears twice.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize);
        }

        let mut seen = [false; DECK_SIZE];
        for card in &cards {
            let slot = &mut seen[card.suit as usize * 13 + card.rank.index()];
            if *slot {
                return Err(DeckError::DuplicateCard);
            }
            *slot = true;
        }

        Ok(Self { cards })
    }

    pub(crate) const fn from_pile(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Shuffles the deck in place (Fisher-Yates) using the given source.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes and returns the top card, or `None` if the deck is empty.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the cards, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn new_deck_is_canonical() {
        let deck = Deck::new();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.cards()[0], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(deck.cards()[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck.cards()[51], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn shuffle_is_reproducible_for_a_seed() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle(&mut ChaCha8Rng::seed_from_u64(9));
        b.shuffle(&mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_ne!(a, Deck::new());
        assert!(Deck::from_cards(a.cards().to_vec()).is_ok());
    }

    #[test]
    fn pop_takes_last_card() {
        let mut deck = Deck::new();
        assert_eq!(deck.pop_top(), Some(Card::new(Rank::King, Suit::Spades)));
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn stacked_deck_is_validated() {
        let mut cards = Deck::new().cards().to_vec();
        cards.pop();
        assert_eq!(Deck::from_cards(cards.clone()), Err(DeckError::WrongSize));
        cards.push(cards[0]);
        assert_eq!(Deck::from_cards(cards), Err(DeckError::DuplicateCard));
    }
}
