//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when joining a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JoinError {
    /// Cards have already been dealt.
    #[error("game has already started")]
    GameAlreadyStarted,
    /// Another player already uses this name.
    #[error("player name is already taken")]
    DuplicatePlayerName,
    /// No more player ids can be assigned.
    #[error("too many players")]
    TooManyPlayers,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Cards have already been dealt.
    #[error("game has already started")]
    GameAlreadyStarted,
    /// Nobody has joined the game.
    #[error("no players have joined")]
    NoPlayers,
    /// One deck cannot deal a full hand to every player.
    #[error("too many players for one deck")]
    DeckTooSmallForPlayers,
}

/// Errors that can occur when picking up from the stock or the discard pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PickUpError {
    /// Player not found.
    #[error("player not found")]
    NoSuchPlayer,
    /// The game has not been dealt or is already over.
    #[error("game is not in progress")]
    NotInProgress,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotCurrentPlayer,
    /// Cards were already picked up this turn.
    #[error("cards were already picked up this turn")]
    WrongTurnState,
    /// Pickup count is zero or larger than the discard pile.
    #[error("invalid number of cards to pick up")]
    InvalidPickupCount,
    /// The bottom card taken could not be played this turn.
    #[error("bottom card taken from the discard pile cannot be played")]
    UnplayableForcedCard,
    /// The stock is empty and the discard pile has nothing to reshuffle.
    #[error("no cards left to draw")]
    NoCards,
}

/// Errors that can occur when playing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Player not found.
    #[error("player not found")]
    NoSuchPlayer,
    /// The game has not been dealt or is already over.
    #[error("game is not in progress")]
    NotInProgress,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotCurrentPlayer,
    /// Cards must be picked up before playing.
    #[error("cards must be picked up before playing")]
    WrongTurnState,
    /// The play is empty or would leave nothing to discard.
    #[error("play must leave at least one card in hand")]
    HandTooSmall,
    /// A card in the play is not in the player's hand.
    #[error("card is not in hand")]
    CardNotInHand,
    /// A card appears more than once in the play.
    #[error("duplicate card in request")]
    DuplicateCardInRequest,
    /// The cards form neither a new meld nor rummies off existing melds.
    #[error("cards are neither a meld nor rummies")]
    InvalidMeldOrRummy,
}

/// Errors that can occur when discarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscardError {
    /// Player not found.
    #[error("player not found")]
    NoSuchPlayer,
    /// The game has not been dealt or is already over.
    #[error("game is not in progress")]
    NotInProgress,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotCurrentPlayer,
    /// Cards must be picked up before discarding.
    #[error("cards must be picked up before discarding")]
    WrongTurnState,
    /// The card taken from the discard pile has not been played yet.
    #[error("forced card must be played before discarding")]
    ForcedCardPending,
    /// The card is not in the player's hand.
    #[error("card is not in hand")]
    CardNotInHand,
}

/// Errors that can occur when calling rummy on the discard pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RummyError {
    /// Player not found.
    #[error("player not found")]
    NoSuchPlayer,
    /// The game has not been dealt or is already over.
    #[error("game is not in progress")]
    NotInProgress,
    /// A card is not in the discard pile.
    #[error("card is not in the discard pile")]
    CardNotInDiscard,
    /// A card appears more than once in the call.
    #[error("duplicate card in request")]
    DuplicateCardInRequest,
    /// The cards form neither a new meld nor rummies off existing melds.
    #[error("cards are neither a meld nor rummies")]
    InvalidMeldOrRummy,
}

/// Errors that can occur when reading a player's private state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// Player not found.
    #[error("player not found")]
    NoSuchPlayer,
}

/// Errors that can occur when building a stacked deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The deck does not hold exactly 52 cards.
    #[error("deck must hold exactly 52 cards")]
    WrongSize,
    /// A card appears twice.
    #[error("deck holds a duplicate card")]
    DuplicateCard,
}

/// Errors that can occur when parsing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The text is empty.
    #[error("empty card text")]
    Empty,
    /// The rank is not one of A, 2-10, J, Q, K.
    #[error("invalid rank")]
    InvalidRank,
    /// The suit is not a suit letter or glyph.
    #[error("invalid suit")]
    InvalidSuit,
}

/// Errors that can occur while a computer player takes its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The driver was asked to play when it is not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Picking up failed.
    #[error("pick up failed: {0}")]
    PickUp(#[from] PickUpError),
    /// Playing cards failed.
    #[error("play failed: {0}")]
    Play(#[from] PlayError),
    /// Discarding failed.
    #[error("discard failed: {0}")]
    Discard(#[from] DiscardError),
    /// Reading the hand failed.
    #[error("hand lookup failed: {0}")]
    Player(#[from] PlayerError),
}

/// Errors that can occur in the game registry.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A game with this name already exists.
    #[error("game already exists")]
    GameExists,
    /// No game with this name exists.
    #[error("no such game")]
    NoSuchGame,
}
