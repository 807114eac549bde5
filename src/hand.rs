//! Player hands and meld discovery.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use crate::card::{Card, Rank, Suit};
use crate::meld::{MIN_MELD_SIZE, Meld};

/// A player's hand: an unordered collection of distinct cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand from the given cards, ignoring repeats.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.insert(card);
        }
        hand
    }

    /// Adds a card. Returns `false` if it was already held.
    pub fn insert(&mut self, card: Card) -> bool {
        if self.contains(card) {
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Removes a card. Returns `false` if it was not held.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|&held| held == card) {
            Some(index) => {
                self.cards.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns whether the card is held.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns the cards in no particular order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns a copy of the cards sorted by suit, then rank.
    #[must_use]
    pub fn sorted(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort_by_key(|card| card.suit_rank_key());
        cards
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Total point value of the cards held.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.cards.iter().map(|card| card.value()).sum()
    }

    /// Every rank held three or more times, as one set per rank.
    ///
    /// Four of a kind yields a single four-card set.
    #[must_use]
    pub fn sets(&self) -> Vec<Meld> {
        let mut by_rank: [Vec<Card>; 13] = Default::default();
        for card in self.sorted() {
            by_rank[card.rank.index()].push(card);
        }

        by_rank
            .into_iter()
            .filter(|group| group.len() >= MIN_MELD_SIZE)
            .map(Meld::new)
            .collect()
    }

    /// Every maximal run in the hand, in suit order.
    ///
    /// A five-card run yields only the five-card meld, not its sub-runs.
    #[must_use]
    pub fn runs(&self) -> Vec<Meld> {
        chains(&self.cards)
            .into_iter()
            .filter(|chain| chain.len() >= MIN_MELD_SIZE)
            .map(Meld::new)
            .collect()
    }

    /// All candidate sets followed by all candidate runs.
    ///
    /// A card may appear in more than one candidate.
    #[must_use]
    pub fn melds(&self) -> Vec<Meld> {
        let mut melds = self.sets();
        melds.extend(self.runs());
        melds
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Meld::new(self.sorted()), f)
    }
}

/// Splits cards into maximal same-suit chains of consecutive ranks.
///
/// Chains follow the cyclic successor rule, so Queen, King, Ace is one
/// chain. Output is ordered by suit, then by the rank each chain starts at.
/// Chains of every length are returned, singletons included.
pub(crate) fn chains(cards: &[Card]) -> Vec<Vec<Card>> {
    let mut result = Vec::new();

    for suit in Suit::ALL {
        let mut present = [false; 13];
        for card in cards.iter().filter(|card| card.suit == suit) {
            present[card.rank.index()] = true;
        }

        if present.iter().all(|&held| held) {
            result.push(Rank::ALL.into_iter().map(|rank| Card::new(rank, suit)).collect());
            continue;
        }

        for start in Rank::ALL {
            if !present[start.index()] || present[start.prev().index()] {
                continue;
            }
            let mut chain = Vec::new();
            let mut rank = start;
            while present[rank.index()] {
                chain.push(Card::new(rank, suit));
                rank = rank.next();
            }
            result.push(chain);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(text: &[&str]) -> Hand {
        Hand::from_cards(text.iter().map(|t| t.parse::<Card>().unwrap()))
    }

    #[test]
    fn four_of_a_kind_is_one_set() {
        let h = hand(&["7H", "7D", "7C", "7S", "2H"]);
        let sets = h.sets();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].len(), 4);
    }

    #[test]
    fn runs_are_maximal_per_suit() {
        let h = hand(&["3H", "4H", "5H", "6H", "7H", "9C", "10C", "JC", "KS"]);
        let runs = h.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].len(), 5);
        assert_eq!(runs[1].cards(), hand(&["9C", "10C", "JC"]).sorted().as_slice());
    }

    #[test]
    fn run_wraps_through_king() {
        let h = hand(&["AS", "QS", "KS"]);
        let runs = h.runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].to_string(), "[Q♠ K♠ A♠]");
    }

    #[test]
    fn melds_may_share_cards() {
        let h = hand(&["8H", "9H", "10H", "10C", "10S", "2D"]);
        let melds = h.melds();
        assert_eq!(melds.len(), 2);
        let ten = "10H".parse().unwrap();
        assert!(melds.iter().all(|meld| meld.contains(ten)));
    }

    #[test]
    fn insert_ignores_repeats() {
        let mut h = Hand::new();
        let card: Card = "5D".parse().unwrap();
        assert!(h.insert(card));
        assert!(!h.insert(card));
        assert_eq!(h.len(), 1);
        assert!(h.remove(card));
        assert!(!h.remove(card));
        assert!(h.is_empty());
    }

    #[test]
    fn chains_keep_singletons() {
        let cards = hand(&["2C", "3C", "9C"]).sorted();
        let split = chains(&cards);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].len(), 2);
        assert_eq!(split[1].len(), 1);
    }
}
