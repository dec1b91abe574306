//! Property tests over randomized deals and play-outs.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::deck::{build_deck, deal, shuffle};
use super::passing::{confirm_selection, stage_selection};
use super::rules::{cards_to_pass, MaxRounds};
use super::scoring::pile_points;
use super::state::Phase;
use super::transitions::{collect_trick, init_game, play_card, roll_die, PlayOutcome, SeatSpec};
use super::tricks::{legal_plays, trick_winner};
use super::{CardId, Suit};

fn seats(n: usize) -> Vec<SeatSpec> {
    (0..n)
        .map(|i| SeatSpec {
            id: format!("p{i}"),
            name: format!("Player {i}"),
            is_bot: true,
        })
        .collect()
}

proptest! {
    #[test]
    fn deal_partitions_the_deck(seed in any::<u64>(), n in 3usize..=8) {
        let mut deck = build_deck();
        shuffle(&mut deck, &mut ChaCha8Rng::seed_from_u64(seed));
        let hands = deal(&deck, n).unwrap();

        let ids: HashSet<CardId> = hands.iter().flatten().map(|c| c.id).collect();
        prop_assert_eq!(ids.len(), 60);
        prop_assert_eq!(hands.iter().map(Vec::len).sum::<usize>(), 60);
    }

    #[test]
    fn passing_preserves_hand_sizes(seed in any::<u64>(), n in 3usize..=8) {
        let mut game = init_game(
            "ROOM".into(),
            seats(n),
            MaxRounds::Finite(1),
            &mut ChaCha8Rng::seed_from_u64(seed),
        ).unwrap();
        let sizes: Vec<usize> = game.players.iter().map(|p| p.hand.len()).collect();

        for seat in 0..n {
            let ids: Vec<CardId> = game.players[seat].hand[..cards_to_pass(n)]
                .iter().map(|c| c.id).collect();
            stage_selection(&mut game, seat, ids).unwrap();
            confirm_selection(&mut game, seat).unwrap();
        }
        prop_assert_eq!(game.phase, Phase::RollingDie);
        for (seat, p) in game.players.iter().enumerate() {
            prop_assert_eq!(p.hand.len(), sizes[seat]);
        }
    }

    /// Playing the first legal card to the end of a round never
    /// violates legality, conservation, or the 250-point total.
    #[test]
    fn random_playout_upholds_invariants(seed in any::<u64>(), n in 3usize..=8) {
        let mut game = init_game(
            "ROOM".into(),
            seats(n),
            MaxRounds::Finite(1),
            &mut ChaCha8Rng::seed_from_u64(seed),
        ).unwrap();
        for seat in 0..n {
            let ids: Vec<CardId> = game.players[seat].hand[..cards_to_pass(n)]
                .iter().map(|c| c.id).collect();
            stage_selection(&mut game, seat, ids).unwrap();
            confirm_selection(&mut game, seat).unwrap();
        }
        let papayoo = Suit::CLASSIC[(seed % 4) as usize];
        roll_die(&mut game, papayoo).unwrap();

        loop {
            let seat = game.current_player;
            let legal = legal_plays(&game.players[seat].hand, game.lead_suit);
            prop_assert!(!legal.is_empty());
            if let Some(lead) = game.lead_suit {
                if game.players[seat].hand.iter().any(|c| c.suit == lead) {
                    prop_assert!(legal.iter().all(|c| c.suit == lead));
                }
            }
            match play_card(&mut game, seat, legal[0].id).unwrap() {
                PlayOutcome::NextPlayer => {}
                PlayOutcome::TrickComplete { winner_seat } => {
                    // Winner holds the highest card of the lead suit.
                    let lead = game.current_trick[0].card.suit;
                    let best = game.current_trick.iter()
                        .filter(|p| p.card.suit == lead)
                        .map(|p| p.card.value)
                        .max();
                    let idx = trick_winner(&game.current_trick).unwrap();
                    prop_assert_eq!(Some(game.current_trick[idx].card.value), best);
                    prop_assert_eq!(&game.current_trick[idx].player_id,
                        &game.players[winner_seat].id);
                    collect_trick(&mut game).unwrap();
                }
                PlayOutcome::RoundOver { .. } => break,
            }
        }

        let total: i32 = game.players.iter().map(|p| p.last_round_points).sum();
        prop_assert_eq!(total, 250);
    }

    /// Scoring a pile is a pure function of its contents.
    #[test]
    fn scoring_is_idempotent(indices in prop::collection::hash_set(0usize..60, 0..20)) {
        let deck = build_deck();
        let pile: Vec<_> = indices.iter().map(|&i| deck[i]).collect();
        for suit in Suit::CLASSIC {
            let a = pile_points(&pile, suit);
            let b = pile_points(&pile, suit);
            prop_assert_eq!(a, b);
            prop_assert!(a >= 0);
        }
    }
}
