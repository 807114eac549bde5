//! A Rummy 500 game engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs a whole game: joining,
//! dealing, picking up from the stock or the discard pile, playing melds
//! and rummies, discarding, and calling rummy out of turn. Observers
//! subscribe to a bounded stream of [`GameEvent`]s. Computer players are
//! built from a [`Strategy`] and driven with [`play_game`].
//!
//! # Example
//!
//! ```
//! use rummy500::{ComputerPlayer, Game, GameOptions, play_game, strategy};
//!
//! let mut game = Game::new(GameOptions::default(), 42);
//! let greedy = strategy::by_name("greedy").unwrap();
//! let mut players = [
//!     ComputerPlayer::join(&mut game, "alice", (greedy.make)(1)).unwrap(),
//!     ComputerPlayer::join(&mut game, "bob", (greedy.make)(2)).unwrap(),
//! ];
//! game.deal().unwrap();
//!
//! play_game(&mut game, &mut players, 20).unwrap();
//! assert_eq!(game.snapshot().card_total(), 52);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod computer;
pub mod deck;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod meld;
pub mod options;
pub mod player;
#[cfg(feature = "std")]
pub mod registry;
pub mod snapshot;
pub mod strategy;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit, sequential};
pub use computer::{ComputerPlayer, play_game};
pub use deck::Deck;
#[cfg(feature = "std")]
pub use error::RegistryError;
pub use error::{
    DealError, DeckError, DiscardError, JoinError, ParseCardError, PickUpError, PlayError,
    PlayerError, RummyError, TurnError,
};
pub use event::{EventReceiver, GameEvent, GameEventKind};
pub use game::{Game, GamePhase, TurnState};
pub use hand::Hand;
pub use meld::{MIN_MELD_SIZE, Meld, MeldKind, can_rummy};
pub use options::{GameOptions, OverflowPolicy};
pub use player::{Player, PlayerId};
#[cfg(feature = "std")]
pub use registry::{GameRegistry, SharedGame};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
pub use strategy::{Strategy, StrategyFactory};
