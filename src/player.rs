//! Per-player state.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::Hand;
use crate::meld::Meld;

/// Identifier assigned to a player at join time, in join order from zero.
pub type PlayerId = u8;

/// A seated player: name, hand, and everything played so far.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    pub(crate) hand: Hand,
    pub(crate) melds: Vec<Meld>,
    pub(crate) rummies: Vec<Card>,
}

impl Player {
    pub(crate) const fn new(name: String) -> Self {
        Self {
            name,
            hand: Hand::new(),
            melds: Vec::new(),
            rummies: Vec::new(),
        }
    }

    /// Returns the player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cards still in hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the melds this player has laid down, in play order.
    #[must_use]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    /// Returns the single cards this player has played off existing melds.
    #[must_use]
    pub fn rummies(&self) -> &[Card] {
        &self.rummies
    }

    /// Publicly visible score: played melds plus rummies.
    #[must_use]
    pub fn public_score(&self) -> i32 {
        let melds: i32 = self.melds.iter().map(Meld::value).sum();
        let rummies: i32 = self.rummies.iter().map(|card| card.value()).sum();
        melds + rummies
    }

    /// Final score: the public score less the value of cards left in hand.
    #[must_use]
    pub fn final_score(&self) -> i32 {
        self.public_score() - self.hand.value()
    }

    /// Number of cards this player accounts for across hand, melds, and rummies.
    pub(crate) fn card_count(&self) -> usize {
        self.hand.len() + self.melds.iter().map(Meld::len).sum::<usize>() + self.rummies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn final_score_subtracts_hand() {
        let mut player = Player::new("ann".into());
        player.melds.push(Meld::new(vec![
            "7H".parse().unwrap(),
            "8H".parse().unwrap(),
            "9H".parse().unwrap(),
        ]));
        player.rummies.push("AS".parse().unwrap());
        player.hand.insert("KD".parse().unwrap());

        assert_eq!(player.public_score(), 30);
        assert_eq!(player.final_score(), 20);
        assert_eq!(player.card_count(), 5);
    }
}
