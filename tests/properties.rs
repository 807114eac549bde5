//! Property-based tests for meld recognition and card conservation.

mod common;

use std::collections::HashSet;

use proptest::prelude::*;
use rummy500::{
    Card, ComputerPlayer, DECK_SIZE, Game, GameOptions, Meld, Rank, Suit, play_game, strategy,
};

fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

/// Three or four cards of one rank, in any order.
fn set_cards() -> impl Strategy<Value = Vec<Card>> {
    (rank(), 3..=4usize).prop_flat_map(|(rank, len)| {
        Just(Suit::ALL.to_vec())
            .prop_shuffle()
            .prop_map(move |suits| {
                suits[..len]
                    .iter()
                    .map(|&suit| Card::new(rank, suit))
                    .collect()
            })
    })
}

/// A run in chain order starting at `start`, wrapping past King.
fn chain(suit: Suit, start: Rank, len: usize) -> Vec<Card> {
    let mut rank = start;
    let mut cards = Vec::with_capacity(len);
    for _ in 0..len {
        cards.push(Card::new(rank, suit));
        rank = rank.next();
    }
    cards
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Set recognition does not depend on card order.
    #[test]
    fn prop_sets_in_any_order(cards in set_cards()) {
        let meld = Meld::new(cards);
        prop_assert!(meld.is_set());
        prop_assert!(!meld.is_run());
    }

    /// Any shuffle of a run is still a run, and arranging restores chain order.
    #[test]
    fn prop_runs_in_any_order(
        (ordered, shuffled) in (suit(), rank(), 3..=13usize).prop_flat_map(|(suit, start, len)| {
            let ordered = chain(suit, start, len);
            (Just(ordered.clone()), Just(ordered).prop_shuffle())
        })
    ) {
        let meld = Meld::new(shuffled);
        prop_assert!(meld.is_run());
        prop_assert!(!meld.is_set());

        let arranged = meld.arranged();
        if ordered.len() == Rank::ALL.len() {
            prop_assert_eq!(arranged.cards()[0].rank, Rank::Ace);
        } else {
            prop_assert_eq!(arranged.cards(), ordered.as_slice());
        }
    }

    /// Removing an inner card of a run leaves a gap that is no run.
    #[test]
    fn prop_gapped_runs_are_rejected(
        suit in suit(),
        start in rank(),
        len in 4..=11usize,
        gap in 1..3usize,
    ) {
        let mut cards = chain(suit, start, len);
        cards.remove(gap);
        prop_assert!(!Meld::new(cards).is_run());
    }

    /// Computer play never creates, loses, or duplicates a card.
    #[test]
    fn prop_cards_are_conserved(
        seed in any::<u64>(),
        seats in prop::collection::vec(0..2usize, 1..=4),
        max_turns in 0..120u32,
    ) {
        common::init_logging();
        let mut game = Game::new(GameOptions::default(), seed);
        let factories = strategy::registered();
        let mut players: Vec<ComputerPlayer> = seats
            .iter()
            .zip(0u64..)
            .map(|(&index, n)| {
                let factory = &factories[index];
                let name = format!("{}-{n}", factory.name);
                ComputerPlayer::join(&mut game, &name, (factory.make)(seed ^ n)).unwrap()
            })
            .collect();
        game.deal().unwrap();

        let finished = play_game(&mut game, &mut players, max_turns).unwrap();
        prop_assert_eq!(finished, game.is_over());
        prop_assert!(finished || game.turn() <= max_turns);

        let snapshot = game.snapshot();
        prop_assert_eq!(snapshot.card_total(), DECK_SIZE);

        let mut seen = HashSet::new();
        let mut visible = snapshot.discard_pile.clone();
        for player in &snapshot.players {
            visible.extend(player.melds.iter().flat_map(|meld| meld.cards().iter().copied()));
            visible.extend(player.rummies.iter().copied());
            visible.extend(game.hand(player.id).unwrap());
        }
        for card in &visible {
            prop_assert!(seen.insert(*card), "card {} appears twice", card);
        }
        prop_assert_eq!(seen.len() + snapshot.stock_count, DECK_SIZE);

        for meld in &snapshot.aggregated_melds {
            prop_assert!(meld.kind().is_some(), "aggregated meld {} is invalid", meld);
        }
    }
}
