//! End-to-end round flow over the pure transition functions.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::passing::{confirm_selection, stage_selection};
use super::rules::MaxRounds;
use super::state::{Game, Phase};
use super::transitions::{
    collect_trick, init_game, play_card, roll_die, start_next_round, PlayOutcome, SeatSpec,
};
use super::tricks::legal_plays;
use super::{CardId, Suit};

fn seats(n: usize) -> Vec<SeatSpec> {
    (0..n)
        .map(|i| SeatSpec {
            id: format!("p{i}"),
            name: format!("Player {i}"),
            is_bot: i != 0,
        })
        .collect()
}

fn new_game(n: usize, max_rounds: MaxRounds, seed: u64) -> Game {
    init_game(
        "ROOM".into(),
        seats(n),
        max_rounds,
        &mut ChaCha8Rng::seed_from_u64(seed),
    )
    .unwrap()
}

/// Every card id appears exactly once across hands, piles and the table.
/// (`trick_history` is an archive of already-collected cards and is not
/// part of the live multiset.)
fn assert_conservation(game: &Game) {
    let mut ids: Vec<CardId> = Vec::with_capacity(60);
    for p in &game.players {
        ids.extend(p.hand.iter().map(|c| c.id));
        ids.extend(p.collected_cards.iter().map(|c| c.id));
    }
    ids.extend(game.current_trick.iter().map(|t| t.card.id));
    assert_eq!(ids.len(), 60);
    let unique: HashSet<CardId> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 60);
}

fn pass_all(game: &mut Game) {
    let n = game.player_count;
    for seat in 0..n {
        let ids: Vec<CardId> = game.players[seat].hand[..game.cards_to_pass]
            .iter()
            .map(|c| c.id)
            .collect();
        stage_selection(game, seat, ids).unwrap();
        confirm_selection(game, seat).unwrap();
    }
    assert_eq!(game.phase, Phase::RollingDie);
}

/// Drive one full round by always playing the first legal card.
fn play_out_round(game: &mut Game) -> PlayOutcome {
    loop {
        let seat = game.current_player;
        let legal = legal_plays(&game.players[seat].hand, game.lead_suit);
        assert!(!legal.is_empty());
        let outcome = play_card(game, seat, legal[0].id).unwrap();
        match outcome {
            PlayOutcome::NextPlayer => {}
            PlayOutcome::TrickComplete { winner_seat } => {
                assert_eq!(game.phase, Phase::TrickEnd);
                assert_eq!(game.current_trick.len(), game.player_count);
                collect_trick(game).unwrap();
                assert_eq!(game.phase, Phase::Playing);
                assert_eq!(game.current_player, winner_seat);
            }
            PlayOutcome::RoundOver { .. } => return outcome,
        }
    }
}

#[test]
fn full_round_conserves_cards_and_scores_250() {
    for n in [3usize, 4, 5, 8] {
        let mut game = new_game(n, MaxRounds::Finite(2), 11);
        pass_all(&mut game);
        roll_die(&mut game, Suit::Club).unwrap();
        assert_eq!(game.phase, Phase::Playing);

        let outcome = play_out_round(&mut game);
        assert!(matches!(outcome, PlayOutcome::RoundOver { game_over: false }));
        assert_eq!(game.phase, Phase::RoundEnd);

        // All penalty points in the deck were handed out.
        let total: i32 = game.players.iter().map(|p| p.last_round_points).sum();
        assert_eq!(total, 250);
        assert!(game.players.iter().all(|p| p.collected_cards.is_empty()));
        assert!(game.players.iter().all(|p| p.hand.is_empty()));
    }
}

#[test]
fn conservation_holds_mid_round() {
    let mut game = new_game(4, MaxRounds::Finite(1), 5);
    pass_all(&mut game);
    roll_die(&mut game, Suit::Heart).unwrap();

    for _ in 0..10 {
        let seat = game.current_player;
        let legal = legal_plays(&game.players[seat].hand, game.lead_suit);
        let outcome = play_card(&mut game, seat, legal[0].id).unwrap();
        assert_conservation(&game);
        if matches!(outcome, PlayOutcome::TrickComplete { .. }) {
            collect_trick(&mut game).unwrap();
            assert_conservation(&game);
        }
    }
}

#[test]
fn finite_game_ends_after_max_rounds() {
    let mut game = new_game(3, MaxRounds::Finite(2), 21);

    pass_all(&mut game);
    roll_die(&mut game, Suit::Spade).unwrap();
    assert!(matches!(
        play_out_round(&mut game),
        PlayOutcome::RoundOver { game_over: false }
    ));

    start_next_round(&mut game, &mut ChaCha8Rng::seed_from_u64(22)).unwrap();
    assert_eq!(game.round_number, 2);
    assert_eq!(game.phase, Phase::Passing);
    assert!(game.trick_history.is_empty());
    assert_eq!(game.papayoo_suit, None);

    pass_all(&mut game);
    roll_die(&mut game, Suit::Diamond).unwrap();
    assert!(matches!(
        play_out_round(&mut game),
        PlayOutcome::RoundOver { game_over: true }
    ));
    assert_eq!(game.phase, Phase::GameEnd);
}

#[test]
fn infinite_game_ends_at_target_score() {
    let mut game = new_game(3, MaxRounds::Infinite, 31);

    // Pump one seat past the target before finishing the round.
    game.players[1].score = 249;
    pass_all(&mut game);
    roll_die(&mut game, Suit::Club).unwrap();
    let outcome = play_out_round(&mut game);

    // 250 penalty points were just distributed, so seat 1 crossed 250
    // unless it somehow took zero points; either way the rule is
    // score-based, not round-based.
    let over = game.players.iter().any(|p| p.score >= 250);
    assert_eq!(matches!(outcome, PlayOutcome::RoundOver { game_over: true }), over);
}

#[test]
fn guards_reject_out_of_phase_actions() {
    let mut game = new_game(3, MaxRounds::Finite(1), 41);
    // Cannot roll or play while passing.
    assert!(roll_die(&mut game, Suit::Club).is_err());
    let id = game.players[0].hand[0].id;
    assert!(play_card(&mut game, 0, id).is_err());
    assert!(collect_trick(&mut game).is_err());
    assert!(start_next_round(&mut game, &mut ChaCha8Rng::seed_from_u64(0)).is_err());
}

#[test]
fn die_rejects_payoo() {
    let mut game = new_game(3, MaxRounds::Finite(1), 43);
    pass_all(&mut game);
    assert!(roll_die(&mut game, Suit::Payoo).is_err());
    assert!(roll_die(&mut game, Suit::Heart).is_ok());
}

#[test]
fn out_of_turn_play_is_rejected() {
    let mut game = new_game(4, MaxRounds::Finite(1), 47);
    pass_all(&mut game);
    roll_die(&mut game, Suit::Spade).unwrap();

    let wrong_seat = game.next_seat(game.current_player);
    let id = game.players[wrong_seat].hand[0].id;
    assert!(play_card(&mut game, wrong_seat, id).is_err());
}
