//! Shared helpers for integration tests.

use std::sync::Once;

use rummy500::{Card, Deck, Game, GameOptions, PlayerId};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Installs a test log subscriber once per binary.
///
/// The filter comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn card(text: &str) -> Card {
    text.parse().unwrap()
}

pub fn cards(text: &[&str]) -> Vec<Card> {
    text.iter().map(|t| card(t)).collect()
}

const SEATS: [&str; 4] = ["north", "east", "south", "west"];

/// Returns the join index of the player the seed picks to go first in a
/// game of `players` dealt without shuffling.
fn starting_seat(seed: u64, hand_size: usize, players: usize) -> usize {
    let options = GameOptions::default().with_hand_size(hand_size);
    let mut probe = Game::with_deck(options, seed, Deck::new());
    for name in &SEATS[..players] {
        probe.add_player(name).unwrap();
    }
    probe.deal().unwrap();
    usize::from(probe.current_player().unwrap())
}

/// Builds a dealt game of two to four players with fixed hands.
///
/// `hands` are given in turn order: `hands[0]` goes to whoever plays first.
/// `upcard` starts the discard pile and `stock` lists the next stock draws,
/// first draw first. Remaining cards fill the bottom of the stock.
///
/// Returns the game and the player ids in turn order.
pub fn stacked<const N: usize>(
    seed: u64,
    hands: [&[&str]; N],
    upcard: &str,
    stock: &[&str],
) -> (Game, [PlayerId; N]) {
    let hand_size = hands[0].len();
    assert!(hands.iter().all(|hand| hand.len() == hand_size));
    let first = starting_seat(seed, hand_size, N);

    // Seats are dealt in join order; seat `s` plays `(s - first) mod N` turns after the opener.
    let mut draws = Vec::new();
    for seat in 0..N {
        draws.extend(cards(hands[(seat + N - first) % N]));
    }
    draws.push(card(upcard));
    draws.extend(cards(stock));

    let mut order: Vec<Card> = Deck::new()
        .cards()
        .iter()
        .copied()
        .filter(|c| !draws.contains(c))
        .collect();
    order.extend(draws.iter().rev());

    let options = GameOptions::default().with_hand_size(hand_size);
    let mut game = Game::with_deck(options, seed, Deck::from_cards(order).unwrap());
    let mut ids = [0; N];
    for (seat, id) in ids.iter_mut().enumerate() {
        *id = game.add_player(SEATS[seat]).unwrap();
    }
    game.deal().unwrap();

    let turn_order: [PlayerId; N] = core::array::from_fn(|k| ids[(first + k) % N]);
    assert_eq!(game.current_player(), Some(turn_order[0]));
    (game, turn_order)
}
