//! Read-only views of a game.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::game::{GamePhase, TurnState};
use crate::meld::Meld;
use crate::player::PlayerId;

/// Public state of a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Player ID.
    pub id: PlayerId,
    /// Player name.
    pub name: String,
    /// Melds the player has laid down.
    pub melds: Vec<Meld>,
    /// Cards the player has played off existing melds.
    pub rummies: Vec<Card>,
    /// Number of cards in the player's hand.
    pub hand_size: usize,
    /// Public score while the game runs; final score once it is over.
    pub score: i32,
}

/// Publicly observable state of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Cards left in the stock.
    pub stock_count: usize,
    /// Discard pile, bottom first; the last card is the top.
    pub discard_pile: Vec<Card>,
    /// Every played meld extended with the rummies attributed to it.
    pub aggregated_melds: Vec<Meld>,
    /// Players in join order.
    pub players: Vec<PlayerSnapshot>,
    /// Number of completed turns.
    pub turn: u32,
    /// The player whose turn it is, if the game is running.
    pub current_player: Option<PlayerId>,
    /// Progress within the current turn.
    pub turn_state: TurnState,
    /// Overall game phase.
    pub phase: GamePhase,
    /// Whether the game is over.
    pub is_over: bool,
}

impl GameSnapshot {
    /// Returns the player with the highest score, earliest joiner on ties.
    #[must_use]
    pub fn leader(&self) -> Option<&PlayerSnapshot> {
        self.players
            .iter()
            .reduce(|best, player| if player.score > best.score { player } else { best })
    }

    /// Total cards accounted for across stock, discard pile, and players.
    #[must_use]
    pub fn card_total(&self) -> usize {
        self.stock_count
            + self.discard_pile.len()
            + self
                .players
                .iter()
                .map(|p| {
                    p.hand_size + p.melds.iter().map(Meld::len).sum::<usize>() + p.rummies.len()
                })
                .sum::<usize>()
    }
}
