//! Card types, sequencing, and point values.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseCardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Returns the suit glyph.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
            Self::Spades => '♠',
        }
    }
}

/// Card rank.
///
/// Ranks are ordered Ace low for sorting. For sequencing the order is
/// cyclic: the successor of King is Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Ace.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All ranks from Ace to King.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the cyclic successor (King is followed by Ace).
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 13]
    }

    /// Returns the cyclic predecessor (Ace is preceded by King).
    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + 12) % 13]
    }

    /// Zero-based position, Ace = 0.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Point value of a card of this rank.
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Ace => 15,
            Self::Two
            | Self::Three
            | Self::Four
            | Self::Five
            | Self::Six
            | Self::Seven
            | Self::Eight
            | Self::Nine => 5,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Point value of this card: Ace 15, Two through Nine 5, Ten through King 10.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.rank.value()
    }

    /// Returns whether `next` directly follows this card in a run: same
    /// suit and the cyclic successor rank.
    #[must_use]
    pub fn precedes(self, next: Self) -> bool {
        self.suit == next.suit && self.rank.next() == next.rank
    }

    /// Sort key grouping cards by suit, then rank.
    #[must_use]
    pub const fn suit_rank_key(self) -> (Suit, Rank) {
        (self.suit, self.rank)
    }
}

/// Returns true iff `a` and `b` share a suit and `b` is the cyclic successor of `a`.
#[must_use]
pub fn sequential(a: Card, b: Card) -> bool {
    a.precedes(b)
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Parses `"A♥"`, `"10♣"`, `"qs"`, or `"7H"`.
///
/// ```
/// use rummy500::{Card, Rank, Suit};
///
/// let card: Card = "10♣".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ten, Suit::Clubs));
/// assert_eq!("qs".parse::<Card>().unwrap().to_string(), "Q♠");
/// ```
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s.chars().next_back().ok_or(ParseCardError::Empty)?;
        let rank_text = &s[..s.len() - suit_char.len_utf8()];

        let suit = match suit_char.to_ascii_uppercase() {
            'H' | '♥' => Suit::Hearts,
            'D' | '♦' => Suit::Diamonds,
            'C' | '♣' => Suit::Clubs,
            'S' | '♠' => Suit::Spades,
            _ => return Err(ParseCardError::InvalidSuit),
        };

        let rank = Rank::ALL
            .into_iter()
            .find(|rank| rank.label().eq_ignore_ascii_case(rank_text))
            .ok_or(ParseCardError::InvalidRank)?;

        Ok(Self::new(rank, suit))
    }
}

/// Number of cards in the deck.
pub const DECK_SIZE: usize = 52;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_wraps_king_to_ace() {
        assert_eq!(Rank::King.next(), Rank::Ace);
        assert_eq!(Rank::Ace.prev(), Rank::King);
        assert!(sequential(
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Clubs)
        ));
        assert!(!sequential(
            Card::new(Rank::King, Suit::Clubs),
            Card::new(Rank::Ace, Suit::Hearts)
        ));
        assert!(!sequential(
            Card::new(Rank::Five, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Clubs)
        ));
    }

    #[test]
    fn values_follow_rank_bands() {
        assert_eq!(Rank::Ace.value(), 15);
        assert_eq!(Rank::Two.value(), 5);
        assert_eq!(Rank::Nine.value(), 5);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::King.value(), 10);
    }

    #[test]
    fn parse_rejects_bad_text() {
        assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
        assert_eq!("7X".parse::<Card>(), Err(ParseCardError::InvalidSuit));
        assert_eq!("1H".parse::<Card>(), Err(ParseCardError::InvalidRank));
        assert_eq!(
            "ah".parse::<Card>(),
            Ok(Card::new(Rank::Ace, Suit::Hearts))
        );
    }
}
