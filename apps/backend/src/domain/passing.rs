//! The card-passing protocol that opens every round.
//!
//! Seats stage a selection, then confirm it. No hand is touched until
//! every seat has confirmed; the rotation is then applied to the whole
//! table at once.

use std::collections::HashSet;

use tracing::debug;

use crate::errors::domain::{DomainError, ValidationKind};

use super::cards_types::CardId;
use super::deck::sort_hand;
use super::state::{require_phase, Game, Phase};

/// Stage (or restage) a seat's pass selection. Ids must be distinct,
/// in the seat's hand, and no more than the round's pass count.
pub fn stage_selection(game: &mut Game, seat: usize, cards: Vec<CardId>) -> Result<(), DomainError> {
    require_phase(game, Phase::Passing)?;

    let unique: HashSet<CardId> = cards.iter().copied().collect();
    if unique.len() != cards.len() || cards.len() > game.cards_to_pass {
        return Err(DomainError::validation(
            ValidationKind::WrongSelectionCount,
            format!(
                "selection must be at most {} distinct cards, got {}",
                game.cards_to_pass,
                cards.len()
            ),
        ));
    }
    let player = &game.players[seat];
    if let Some(missing) = cards.iter().find(|id| !player.has_card(**id)) {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {missing} is not in {}'s hand", player.id),
        ));
    }
    game.players[seat].selected_cards = cards;
    Ok(())
}

/// Lock a seat's staged selection. Returns `true` if this confirmation
/// completed the table and the rotation was applied.
pub fn confirm_selection(game: &mut Game, seat: usize) -> Result<bool, DomainError> {
    require_phase(game, Phase::Passing)?;

    let player = &game.players[seat];
    if player.selected_cards.len() != game.cards_to_pass {
        return Err(DomainError::validation(
            ValidationKind::WrongSelectionCount,
            format!(
                "must confirm exactly {} cards, staged {}",
                game.cards_to_pass,
                player.selected_cards.len()
            ),
        ));
    }
    let selection = std::mem::take(&mut game.players[seat].selected_cards);
    game.players[seat].cards_to_pass = selection;
    debug!(room = %game.room_code, seat, "pass selection confirmed");

    if game
        .players
        .iter()
        .all(|p| p.cards_to_pass.len() == game.cards_to_pass)
    {
        rotate_passes(game);
        return Ok(true);
    }
    Ok(false)
}

/// Apply the table-wide rotation: seat `i` receives the cards seat
/// `(i + 1) % n` confirmed. Hands only change here.
fn rotate_passes(game: &mut Game) {
    let n = game.player_count;
    let mut passed: Vec<Vec<super::cards_types::Card>> = Vec::with_capacity(n);
    for player in &mut game.players {
        let ids = std::mem::take(&mut player.cards_to_pass);
        let mut cards = Vec::with_capacity(ids.len());
        player.hand.retain(|c| {
            if ids.contains(&c.id) {
                cards.push(*c);
                false
            } else {
                true
            }
        });
        passed.push(cards);
    }
    for i in 0..n {
        let from = (i + 1) % n;
        game.players[i].hand.extend(passed[from].iter().copied());
        sort_hand(&mut game.players[i].hand);
    }
    game.phase = Phase::RollingDie;
    game.stamp("Cards passed. Roll the die to pick the papayoo suit.");
    debug!(room = %game.room_code, "pass rotation applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deck::{build_deck, deal};
    use crate::domain::rules::{cards_to_pass, MaxRounds};
    use crate::domain::state::Player;

    fn game_with_hands(player_count: usize) -> Game {
        let deck = build_deck();
        let hands = deal(&deck, player_count).unwrap();
        let players = hands
            .into_iter()
            .enumerate()
            .map(|(i, hand)| {
                let mut p = Player::new(format!("p{i}"), format!("Player {i}"), i != 0);
                p.hand = hand;
                p
            })
            .collect();
        Game {
            room_code: "ROOM".into(),
            player_count,
            players,
            phase: Phase::Passing,
            round_number: 1,
            max_rounds: MaxRounds::Finite(4),
            papayoo_suit: None,
            current_player: 0,
            lead_suit: None,
            current_trick: Vec::new(),
            trick_history: Vec::new(),
            trick_count: 0,
            cards_to_pass: cards_to_pass(player_count),
            last_update: 0,
            message: String::new(),
        }
    }

    fn first_n_ids(game: &Game, seat: usize, n: usize) -> Vec<CardId> {
        game.players[seat].hand[..n].iter().map(|c| c.id).collect()
    }

    #[test]
    fn stage_rejects_duplicates_and_foreign_cards() {
        let mut game = game_with_hands(4);
        let id = game.players[0].hand[0].id;
        assert!(stage_selection(&mut game, 0, vec![id, id]).is_err());

        let foreign = game.players[1].hand[0].id;
        assert!(stage_selection(&mut game, 0, vec![foreign]).is_err());
    }

    #[test]
    fn confirm_requires_exact_count() {
        let mut game = game_with_hands(4);
        let ids = first_n_ids(&game, 0, 3);
        stage_selection(&mut game, 0, ids).unwrap();
        assert!(matches!(
            confirm_selection(&mut game, 0),
            Err(DomainError::Validation(
                ValidationKind::WrongSelectionCount,
                _
            ))
        ));
    }

    #[test]
    fn partial_confirmation_leaves_hands_untouched() {
        let mut game = game_with_hands(4);
        let before: Vec<Vec<_>> = game.players.iter().map(|p| p.hand.clone()).collect();

        for seat in 0..3 {
            let ids = first_n_ids(&game, seat, game.cards_to_pass);
            stage_selection(&mut game, seat, ids).unwrap();
            assert!(!confirm_selection(&mut game, seat).unwrap());
        }
        for (seat, hand) in before.iter().enumerate() {
            assert_eq!(&game.players[seat].hand, hand);
        }
        assert_eq!(game.phase, Phase::Passing);
    }

    #[test]
    fn full_confirmation_rotates_and_advances() {
        for player_count in 3..=8usize {
            let mut game = game_with_hands(player_count);
            let n = game.cards_to_pass;
            let selections: Vec<Vec<CardId>> = (0..player_count)
                .map(|seat| first_n_ids(&game, seat, n))
                .collect();
            let sizes: Vec<usize> = game.players.iter().map(|p| p.hand.len()).collect();

            for (seat, ids) in selections.iter().enumerate() {
                stage_selection(&mut game, seat, ids.clone()).unwrap();
                let advanced = confirm_selection(&mut game, seat).unwrap();
                assert_eq!(advanced, seat == player_count - 1);
            }

            assert_eq!(game.phase, Phase::RollingDie);
            for (seat, player) in game.players.iter().enumerate() {
                // Hand size unchanged by the pass round-trip.
                assert_eq!(player.hand.len(), sizes[seat]);
                assert!(player.hand.windows(2).all(|w| w[0] <= w[1]));

                // Seat received exactly what its right neighbor selected.
                let from = (seat + 1) % player_count;
                for id in &selections[from] {
                    assert!(player.has_card(*id));
                }
                // And no longer holds what it passed away.
                for id in &selections[seat] {
                    assert!(!player.has_card(*id) || selections[from].contains(id));
                }
            }
        }
    }
}
