//! Game state types.

/// Overall game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Players may join; nothing has been dealt.
    Forming,
    /// Cards are dealt and turns are running.
    Active,
    /// A player has gone out. No further changes are accepted.
    Over,
}

/// Progress within the current player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Waiting for the current player to pick up.
    #[default]
    TurnStart,
    /// Cards were picked up; the player may play or discard.
    PickedUpCards,
    /// At least one play was made; the player may play again or discard.
    PlayedCards,
}
