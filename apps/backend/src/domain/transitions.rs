//! Phase transitions: the only functions that mutate a `Game`.
//!
//! Each transition guards phase and turn order, applies exactly one
//! mutation, and leaves the snapshot ready for persistence. Bot
//! orchestration lives in the service layer, not here.

use rand::Rng;
use tracing::debug;

use crate::errors::domain::{DomainError, ValidationKind};

use super::cards_types::{CardId, Suit};
use super::deck::{build_deck, deal, shuffle};
use super::rules::{cards_to_pass, MaxRounds, TARGET_SCORE};
use super::scoring::pile_points;
use super::state::{
    require_card_in_hand, require_current_player, require_phase, Game, Phase, Player, TrickPlay,
};
use super::tricks::{require_legal_play, trick_winner_seat};

/// Seat assignment consumed at game creation.
#[derive(Debug, Clone)]
pub struct SeatSpec {
    pub id: String,
    pub name: String,
    pub is_bot: bool,
}

/// Outcome of a single card play, for the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Trick still open; `current_player` advanced.
    NextPlayer,
    /// Trick complete; table held for an explicit collect.
    TrickComplete { winner_seat: usize },
    /// Final trick of the round; scores applied.
    RoundOver { game_over: bool },
}

/// Create the authoritative snapshot for a room going active: shuffle,
/// deal, and open the passing phase.
pub fn init_game(
    room_code: String,
    seats: Vec<SeatSpec>,
    max_rounds: MaxRounds,
    rng: &mut impl Rng,
) -> Result<Game, DomainError> {
    let player_count = seats.len();
    let mut deck = build_deck();
    shuffle(&mut deck, rng);
    let hands = deal(&deck, player_count)?;

    let players = seats
        .into_iter()
        .zip(hands)
        .map(|(seat, hand)| {
            let mut p = Player::new(seat.id, seat.name, seat.is_bot);
            p.hand = hand;
            p
        })
        .collect();

    let pass_count = cards_to_pass(player_count);
    let mut game = Game {
        room_code,
        player_count,
        players,
        phase: Phase::Passing,
        round_number: 1,
        max_rounds,
        papayoo_suit: None,
        current_player: 0,
        lead_suit: None,
        current_trick: Vec::new(),
        trick_history: Vec::new(),
        trick_count: 0,
        cards_to_pass: pass_count,
        last_update: 0,
        message: String::new(),
    };
    game.stamp(format!("Select {pass_count} cards to pass"));
    debug!(room = %game.room_code, player_count, "game initialized");
    Ok(game)
}

/// Fix the papayoo suit and open play. `suit` must be one of the four
/// classic suits; callers roll the die when the client did not supply one.
pub fn roll_die(game: &mut Game, suit: Suit) -> Result<(), DomainError> {
    require_phase(game, Phase::RollingDie)?;
    if !suit.is_classic() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSuit,
            "papayoo suit must be a classic suit",
        ));
    }
    game.papayoo_suit = Some(suit);
    game.phase = Phase::Playing;
    game.stamp(format!(
        "The papayoo suit is {suit:?}! Its 7 is worth 40 points"
    ));
    debug!(room = %game.room_code, ?suit, "papayoo suit rolled");
    Ok(())
}

/// Play one card for the seat expected to act.
pub fn play_card(
    game: &mut Game,
    seat: usize,
    card_id: CardId,
) -> Result<PlayOutcome, DomainError> {
    require_phase(game, Phase::Playing)?;
    require_current_player(game, seat)?;
    let card = require_card_in_hand(&game.players[seat], card_id)?;
    require_legal_play(&game.players[seat].hand, &card, game.lead_suit)?;

    game.players[seat].hand.retain(|c| c.id != card_id);
    if game.lead_suit.is_none() {
        game.lead_suit = Some(card.suit);
    }
    game.current_trick.push(TrickPlay {
        player_id: game.players[seat].id.clone(),
        card,
    });
    debug!(room = %game.room_code, seat, card_id, "card played");

    if game.current_trick.len() < game.player_count {
        game.current_player = game.next_seat(seat);
        let next = game.current_player_ref().name.clone();
        game.stamp(format!("{next}'s turn"));
        return Ok(PlayOutcome::NextPlayer);
    }

    // Trick complete. The winner is recomputable from the table, so no
    // extra field is stored.
    let winner_seat = trick_winner_seat(game).ok_or_else(|| {
        DomainError::validation_other("completed trick has no resolvable winner")
    })?;

    let last_trick = game.players.iter().all(|p| p.hand.is_empty());
    if last_trick {
        collect_completed_trick(game, winner_seat);
        let game_over = finish_round(game)?;
        return Ok(PlayOutcome::RoundOver { game_over });
    }

    // Hold the full trick on the table so every poller sees it before
    // an explicit collect clears it.
    game.phase = Phase::TrickEnd;
    game.current_player = winner_seat;
    let winner = game.players[winner_seat].name.clone();
    game.stamp(format!("{winner} takes the trick"));
    Ok(PlayOutcome::TrickComplete { winner_seat })
}

/// Clear the held trick and resume play with the winner leading.
pub fn collect_trick(game: &mut Game) -> Result<(), DomainError> {
    require_phase(game, Phase::TrickEnd)?;
    let winner_seat = trick_winner_seat(game).ok_or_else(|| {
        DomainError::validation_other("no trick on the table to collect")
    })?;
    collect_completed_trick(game, winner_seat);
    game.phase = Phase::Playing;
    game.current_player = winner_seat;
    let winner = game.players[winner_seat].name.clone();
    game.stamp(format!("{winner}'s turn"));
    Ok(())
}

/// Reshuffle and re-deal after a finished round.
pub fn start_next_round(game: &mut Game, rng: &mut impl Rng) -> Result<(), DomainError> {
    require_phase(game, Phase::RoundEnd)?;

    let mut deck = build_deck();
    shuffle(&mut deck, rng);
    let hands = deal(&deck, game.player_count)?;
    for (player, hand) in game.players.iter_mut().zip(hands) {
        player.hand = hand;
        player.collected_cards.clear();
        player.selected_cards.clear();
        player.cards_to_pass.clear();
        player.last_round_points = 0;
    }

    game.round_number += 1;
    game.phase = Phase::Passing;
    game.papayoo_suit = None;
    game.current_player = 0;
    game.lead_suit = None;
    game.current_trick.clear();
    game.trick_history.clear();
    game.trick_count = 0;
    game.stamp(format!(
        "Round {} - select {} cards to pass",
        game.round_number, game.cards_to_pass
    ));
    debug!(room = %game.room_code, round = game.round_number, "next round dealt");
    Ok(())
}

/// Move the table's cards to the winner's pile and archive the trick.
fn collect_completed_trick(game: &mut Game, winner_seat: usize) {
    let trick = std::mem::take(&mut game.current_trick);
    game.players[winner_seat]
        .collected_cards
        .extend(trick.iter().map(|p| p.card));
    game.trick_history.push(trick);
    game.trick_count += 1;
    game.lead_suit = None;
}

/// Apply round scoring and decide whether the game continues.
fn finish_round(game: &mut Game) -> Result<bool, DomainError> {
    let papayoo = game
        .papayoo_suit
        .ok_or_else(|| DomainError::validation_other("round finished without a papayoo suit"))?;
    for player in &mut game.players {
        let points = pile_points(&player.collected_cards, papayoo);
        player.last_round_points = points;
        player.score += points;
        player.collected_cards.clear();
    }

    let game_over = match game.max_rounds {
        MaxRounds::Finite(_) => game.max_rounds.is_final_round(game.round_number),
        MaxRounds::Infinite => game.players.iter().any(|p| p.score >= TARGET_SCORE),
    };
    game.phase = if game_over {
        Phase::GameEnd
    } else {
        Phase::RoundEnd
    };
    game.stamp(if game_over {
        "Game over!"
    } else {
        "Round over!"
    });
    debug!(room = %game.room_code, game_over, "round finished");
    Ok(game_over)
}
