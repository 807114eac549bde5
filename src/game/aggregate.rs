//! Rebuilds the effective melds on the table.
//!
//! Rummies are stored with the player who played them, not with the meld
//! they extend. To find what each meld looks like now, copies of every
//! played meld are extended in two passes:
//!
//! 1. Each set claims every rummy of its rank. The first set in player, then
//!    play order wins a rank; a rummy matching both a set and a run goes to
//!    the set.
//! 2. The remaining rummies are split into maximal same-suit chains. Each
//!    chain attaches to the first run it extends at either end. A chain that
//!    extends no run is left out of the result.

use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::chains;
use crate::meld::Meld;
use crate::player::Player;

pub(super) fn aggregate(players: &[Player]) -> Vec<Meld> {
    let mut melds: Vec<Meld> = players
        .iter()
        .flat_map(|player| player.melds().iter().cloned())
        .collect();
    let mut rummies: Vec<Card> = players
        .iter()
        .flat_map(|player| player.rummies().iter().copied())
        .collect();

    for meld in &mut melds {
        if !meld.is_set() {
            continue;
        }
        let Some(rank) = meld.first().map(|card| card.rank) else {
            continue;
        };
        rummies.retain(|&card| {
            if card.rank == rank {
                meld.push(card);
                false
            } else {
                true
            }
        });
    }

    for chain in chains(&rummies) {
        let (Some(&low), Some(&high)) = (chain.first(), chain.last()) else {
            continue;
        };
        for meld in &mut melds {
            if !meld.is_run() {
                continue;
            }
            let (Some(first), Some(last)) = (meld.first(), meld.last()) else {
                continue;
            };
            if last.precedes(low) {
                meld.extend_high(&chain);
                break;
            }
            if high.precedes(first) {
                meld.extend_low(&chain);
                break;
            }
        }
    }

    melds
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn cards(text: &[&str]) -> Vec<Card> {
        text.iter().map(|t| t.parse().unwrap()).collect()
    }

    fn player(melds: &[&[&str]], rummies: &[&str]) -> Player {
        let mut player = Player::new(String::from("p"));
        player.melds = melds
            .iter()
            .map(|meld| Meld::new(cards(meld)).arranged())
            .collect();
        player.rummies = cards(rummies);
        player
    }

    #[test]
    fn rummy_from_another_player_extends_run() {
        let players = vec![
            player(&[&["5C", "6C", "7C"]], &[]),
            player(&[], &["8C"]),
        ];
        let melds = aggregate(&players);
        assert_eq!(melds, vec![Meld::new(cards(&["5C", "6C", "7C", "8C"]))]);
    }

    #[test]
    fn played_melds_are_not_modified() {
        let players = vec![player(&[&["5C", "6C", "7C"]], &["4C"])];
        let _ = aggregate(&players);
        assert_eq!(players[0].melds()[0].len(), 3);
    }

    #[test]
    fn chains_attach_at_both_ends() {
        let players = vec![
            player(&[&["5C", "6C", "7C"]], &["2C", "3C", "4C"]),
            player(&[], &["8C", "9C"]),
        ];
        let melds = aggregate(&players);
        assert_eq!(melds.len(), 1);
        assert_eq!(
            melds[0].cards(),
            cards(&["2C", "3C", "4C", "5C", "6C", "7C", "8C", "9C"]).as_slice()
        );
    }

    #[test]
    fn sets_claim_rummies_before_runs() {
        let players = vec![
            player(&[&["9H", "9S", "9D"]], &[]),
            player(&[&["6C", "7C", "8C"]], &["9C"]),
        ];
        let melds = aggregate(&players);
        assert_eq!(melds[0].len(), 4);
        assert!(melds[0].contains("9C".parse().unwrap()));
        assert_eq!(melds[1].len(), 3);
    }

    #[test]
    fn first_run_in_order_wins() {
        let players = vec![
            player(&[&["2H", "3H", "4H"]], &[]),
            player(&[&["6H", "7H", "8H"]], &["5H"]),
        ];
        let melds = aggregate(&players);
        assert_eq!(melds[0].len(), 4);
        assert_eq!(melds[1].len(), 3);
    }

    #[test]
    fn unattached_chains_are_dropped() {
        let players = vec![player(&[&["5C", "6C", "7C"]], &["10C", "JC"])];
        let melds = aggregate(&players);
        assert_eq!(melds, vec![Meld::new(cards(&["5C", "6C", "7C"]))]);
    }

    #[test]
    fn chain_wraps_onto_ace() {
        let players = vec![player(&[&["JD", "QD", "KD"]], &["AD", "2D"])];
        let melds = aggregate(&players);
        assert_eq!(
            melds[0].cards(),
            cards(&["JD", "QD", "KD", "AD", "2D"]).as_slice()
        );
    }
}
