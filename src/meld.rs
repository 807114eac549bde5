//! Meld classification and scoring.
//!
//! A meld is a group of at least three cards that forms either a set (one
//! rank) or a run (one suit, consecutive ranks with King wrapping to Ace).
//! Classification is a pure function of the cards held; nothing is tagged.

use alloc::vec::Vec;
use core::fmt;

use crate::card::{Card, Rank};

/// Minimum number of cards in a set or run.
pub const MIN_MELD_SIZE: usize = 3;

/// The shape a group of cards forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeldKind {
    /// Three or more cards of one rank.
    Set,
    /// Three or more consecutive cards of one suit.
    Run,
}

/// An ordered group of cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Meld {
    cards: Vec<Card>,
}

impl Meld {
    /// Wraps the cards without reordering them.
    #[must_use]
    pub const fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns the cards in presentation order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Consumes the meld, returning its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the meld holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns whether `card` is part of this meld.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns true iff there are at least three cards and all share a rank.
    #[must_use]
    pub fn is_set(&self) -> bool {
        set_rank(&self.cards).is_some()
    }

    /// Returns true iff there are at least three cards of one suit whose
    /// ranks form an unbroken cyclic sequence.
    #[must_use]
    pub fn is_run(&self) -> bool {
        run_order(&self.cards).is_some()
    }

    /// Classifies the cards, or returns `None` if they form neither shape.
    #[must_use]
    pub fn kind(&self) -> Option<MeldKind> {
        if self.is_set() {
            Some(MeldKind::Set)
        } else if self.is_run() {
            Some(MeldKind::Run)
        } else {
            None
        }
    }

    /// Total point value of the cards.
    #[must_use]
    pub fn value(&self) -> i32 {
        self.cards.iter().map(|card| card.value()).sum()
    }

    /// Returns the meld in canonical presentation order: runs from their
    /// low end to their high end, sets by suit. Anything else is unchanged.
    #[must_use]
    pub fn arranged(mut self) -> Self {
        if let Some(ordered) = run_order(&self.cards) {
            self.cards = ordered;
        } else if self.is_set() {
            self.cards.sort_by_key(|card| card.suit);
        }
        self
    }

    /// Returns whether `card` would extend this meld: a set of the same
    /// rank, or either end of a run.
    #[must_use]
    pub fn accepts(&self, card: Card) -> bool {
        if let Some(rank) = set_rank(&self.cards) {
            return rank == card.rank;
        }
        match run_order(&self.cards) {
            Some(run) => run[run.len() - 1].precedes(card) || card.precedes(run[0]),
            None => false,
        }
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn extend_high(&mut self, chain: &[Card]) {
        self.cards.extend_from_slice(chain);
    }

    pub(crate) fn extend_low(&mut self, chain: &[Card]) {
        let mut cards = Vec::with_capacity(chain.len() + self.cards.len());
        cards.extend_from_slice(chain);
        cards.append(&mut self.cards);
        self.cards = cards;
    }

    pub(crate) fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    pub(crate) fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }
}

impl From<Vec<Card>> for Meld {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}

/// Returns whether `card` can be played as a rummy off any of `melds`.
#[must_use]
pub fn can_rummy(card: Card, melds: &[Meld]) -> bool {
    melds.iter().any(|meld| meld.accepts(card))
}

fn set_rank(cards: &[Card]) -> Option<Rank> {
    let first = cards.first()?;
    (cards.len() >= MIN_MELD_SIZE && cards.iter().all(|card| card.rank == first.rank))
        .then_some(first.rank)
}

/// Returns the cards in run order if they form a run.
///
/// The ranks present must form exactly one cyclic arc. A full suit of
/// thirteen cards is a run starting at Ace.
pub(crate) fn run_order(cards: &[Card]) -> Option<Vec<Card>> {
    let first = cards.first()?;
    if cards.len() < MIN_MELD_SIZE || cards.len() > Rank::ALL.len() {
        return None;
    }

    let mut present = [false; 13];
    for card in cards {
        if card.suit != first.suit || present[card.rank.index()] {
            return None;
        }
        present[card.rank.index()] = true;
    }

    let start = if cards.len() == Rank::ALL.len() {
        Rank::Ace
    } else {
        let mut starts = Rank::ALL
            .into_iter()
            .filter(|rank| present[rank.index()] && !present[rank.prev().index()]);
        let start = starts.next()?;
        if starts.next().is_some() {
            return None;
        }
        start
    };

    let mut ordered = Vec::with_capacity(cards.len());
    let mut rank = start;
    for _ in 0..cards.len() {
        ordered.push(Card::new(rank, first.suit));
        rank = rank.next();
    }
    Some(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use alloc::vec;

    const fn c(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn sets_need_three_of_a_rank() {
        let set = Meld::new(vec![
            c(Rank::Five, Suit::Hearts),
            c(Rank::Five, Suit::Spades),
            c(Rank::Five, Suit::Clubs),
        ]);
        assert!(set.is_set());
        assert!(!set.is_run());
        assert_eq!(set.kind(), Some(MeldKind::Set));
        assert_eq!(set.value(), 15);

        let pair = Meld::new(vec![c(Rank::Five, Suit::Hearts), c(Rank::Five, Suit::Spades)]);
        assert_eq!(pair.kind(), None);
    }

    #[test]
    fn runs_accept_any_order_and_wrap() {
        let run = Meld::new(vec![
            c(Rank::Nine, Suit::Hearts),
            c(Rank::Seven, Suit::Hearts),
            c(Rank::Eight, Suit::Hearts),
        ]);
        assert!(run.is_run());
        assert_eq!(run.value(), 15);

        let wrap = Meld::new(vec![
            c(Rank::Ace, Suit::Clubs),
            c(Rank::Queen, Suit::Clubs),
            c(Rank::King, Suit::Clubs),
        ]);
        assert!(wrap.is_run());
        assert_eq!(
            wrap.arranged().cards(),
            &[
                c(Rank::Queen, Suit::Clubs),
                c(Rank::King, Suit::Clubs),
                c(Rank::Ace, Suit::Clubs)
            ]
        );
    }

    #[test]
    fn gaps_and_mixed_suits_are_not_runs() {
        let gap = Meld::new(vec![
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Hearts),
            c(Rank::Five, Suit::Hearts),
        ]);
        assert!(!gap.is_run());

        let mixed = Meld::new(vec![
            c(Rank::Two, Suit::Hearts),
            c(Rank::Three, Suit::Clubs),
            c(Rank::Four, Suit::Hearts),
        ]);
        assert!(!mixed.is_run());
    }

    #[test]
    fn full_suit_is_a_run() {
        let suit: Vec<Card> = Rank::ALL.into_iter().rev().map(|r| c(r, Suit::Spades)).collect();
        let meld = Meld::new(suit).arranged();
        assert!(meld.is_run());
        assert_eq!(meld.first(), Some(c(Rank::Ace, Suit::Spades)));
        assert_eq!(meld.last(), Some(c(Rank::King, Suit::Spades)));
    }

    #[test]
    fn rummy_checks_set_rank_and_run_ends() {
        let melds = vec![
            Meld::new(vec![
                c(Rank::Five, Suit::Clubs),
                c(Rank::Six, Suit::Clubs),
                c(Rank::Seven, Suit::Clubs),
            ]),
            Meld::new(vec![
                c(Rank::Jack, Suit::Hearts),
                c(Rank::Jack, Suit::Clubs),
                c(Rank::Jack, Suit::Spades),
            ]),
        ];
        assert!(can_rummy(c(Rank::Eight, Suit::Clubs), &melds));
        assert!(can_rummy(c(Rank::Four, Suit::Clubs), &melds));
        assert!(can_rummy(c(Rank::Jack, Suit::Diamonds), &melds));
        assert!(!can_rummy(c(Rank::Nine, Suit::Clubs), &melds));
        // A set never takes a sequential neighbour.
        assert!(!can_rummy(c(Rank::Queen, Suit::Hearts), &melds));
    }
}
