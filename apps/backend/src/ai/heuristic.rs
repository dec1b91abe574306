//! Multi-factor heuristic bot.
//!
//! Strategy summary:
//! - pass the most dangerous cards (high Payoos, sevens, high cards in
//!   short suits), keep low Payoos as bait;
//! - never play the papayoo seven while an alternative exists;
//! - when leading, avoid suits where an opponent is known void;
//! - when following a pointed trick, shed the highest card that still
//!   loses, or minimize damage when forced to win;
//! - when void, discard by a fixed danger priority.

use std::collections::HashMap;

use crate::domain::scoring::card_points;
use crate::domain::tricks::legal_plays;
use crate::domain::{Card, CardId, Suit};

use super::{BotPlayer, PlayContext};

/// Hand sizes bounding the "early" and "late" stages of a round.
const EARLY_HAND: usize = 10;

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicBot;

/// Per-card features computed once per decision.
struct CardAnalysis {
    card: Card,
    points: i32,
    would_win: bool,
    is_papayoo: bool,
    opponents_void: bool,
    total_risk: i32,
}

fn is_papayoo_card(card: &Card, papayoo_suit: Suit) -> bool {
    card.suit == papayoo_suit && card.value == 7
}

/// The play currently winning the trick, if any.
fn current_winner(trick: &[Card], lead: Suit) -> Option<Card> {
    trick
        .iter()
        .filter(|c| c.suit == lead)
        .max_by_key(|c| c.value)
        .copied()
}

fn can_win_trick(card: &Card, trick: &[Card], lead: Suit) -> bool {
    if trick.is_empty() {
        return true;
    }
    if card.suit != lead {
        return false;
    }
    match current_winner(trick, lead) {
        Some(winner) => card.value > winner.value,
        None => true,
    }
}

fn trick_points(trick: &[Card], papayoo_suit: Suit) -> i32 {
    trick.iter().map(|c| card_points(c, papayoo_suit)).sum()
}

/// Classic-suit card counts; Payoo length never matters for shedding.
fn classic_suit_counts(hand: &[Card]) -> HashMap<Suit, usize> {
    let mut counts = HashMap::new();
    for card in hand {
        if card.suit.is_classic() {
            *counts.entry(card.suit).or_insert(0) += 1;
        }
    }
    counts
}

/// Danger score used for pass selection. Scaled by 10 to stay integral.
fn pass_danger(card: &Card, suit_counts: &HashMap<Suit, usize>) -> i32 {
    let v = i32::from(card.value);
    if card.suit == Suit::Payoo {
        return match card.value {
            15.. => v * 25,
            10..=14 => v * 20,
            // Low Payoos bait opponents into spending big ones; keep them.
            _ => v * 5,
        };
    }

    let mut danger = match card.value {
        // Any seven may become the 40-point papayoo.
        7 => 350,
        10 => 250,
        9 => 200,
        8 => 150,
        6 => 50,
        5 => 30,
        _ => 0,
    };
    // A high card in a short suit cannot be shed later.
    let count = suit_counts.get(&card.suit).copied().unwrap_or(0);
    if count <= 2 && card.value >= 8 {
        danger += 150;
    }
    danger
}

impl HeuristicBot {
    fn analyze(&self, playable: &[Card], ctx: &PlayContext<'_>) -> Vec<CardAnalysis> {
        let trick = ctx.current_trick_cards;
        let pts = trick_points(trick, ctx.papayoo_suit);
        playable
            .iter()
            .map(|&card| {
                let points = card_points(&card, ctx.papayoo_suit);
                let lead = ctx.lead_suit.unwrap_or(card.suit);
                let would_win = can_win_trick(&card, trick, lead);
                CardAnalysis {
                    card,
                    points,
                    would_win,
                    is_papayoo: is_papayoo_card(&card, ctx.papayoo_suit),
                    opponents_void: ctx.voids.any_opponent_void(ctx.player_id, card.suit),
                    total_risk: if would_win { pts + points } else { 0 },
                }
            })
            .collect()
    }

    fn lead(&self, analysis: Vec<CardAnalysis>, ctx: &PlayContext<'_>) -> Card {
        let early = ctx.hand.len() >= EARLY_HAND;

        // Never open with the papayoo itself.
        let mut working: Vec<&CardAnalysis> =
            non_empty_filter(&analysis, |a| !a.is_papayoo);
        // Avoid opening the papayoo suit at all while other suits remain:
        // it may force our own seven out later in the trick.
        working = non_empty_refilter(working, |a| a.card.suit != ctx.papayoo_suit);
        // Prefer suits no opponent is known void in.
        working = non_empty_refilter(working, |a| !a.opponents_void);

        // Early on, shed high point-free cards while tricks are cheap.
        if early {
            if let Some(best) = working
                .iter()
                .filter(|a| a.points == 0 && a.card.value >= 8)
                .max_by_key(|a| (i32::from(a.card.value) - void_penalty(a, 100), a.card.id))
            {
                return best.card;
            }
        }

        // Low Payoos bait opponents into spending their big ones, but
        // only while enough seats can still be forced to follow.
        let payoo_voids = ctx.voids.count_opponents_void(ctx.player_id, Suit::Payoo);
        if payoo_voids + 2 < ctx.player_count {
            if let Some(small) = working
                .iter()
                .filter(|a| a.card.suit == Suit::Payoo && a.card.value <= 5)
                .min_by_key(|a| a.card.value)
            {
                return small.card;
            }
        }

        // Standard lead: a high point-free card in a long, safe suit.
        let suit_counts = classic_suit_counts(ctx.hand);
        let safe: Vec<&&CardAnalysis> = working.iter().filter(|a| a.points == 0).collect();
        if let Some(best) = safe.iter().max_by_key(|a| {
            let suit_len = suit_counts.get(&a.card.suit).copied().unwrap_or(0) as i32;
            let value_bonus = if early {
                i32::from(a.card.value) * 2
            } else {
                i32::from(a.card.value)
            };
            (suit_len * 10 + value_bonus - void_penalty(a, 50), a.card.id)
        }) {
            return best.card;
        }

        // Every option carries points: lead the cheapest.
        working
            .iter()
            .min_by_key(|a| (a.points, a.card.value, a.card.id))
            .map(|a| a.card)
            .unwrap_or(analysis[0].card)
    }

    fn follow(&self, analysis: Vec<CardAnalysis>, ctx: &PlayContext<'_>, last: bool) -> Card {
        let trick = ctx.current_trick_cards;
        let lead = match ctx.lead_suit {
            Some(lead) => lead,
            None => return self.lead(analysis, ctx),
        };
        let pts = trick_points(trick, ctx.papayoo_suit);
        let can_follow = analysis.iter().any(|a| a.card.suit == lead);

        if !can_follow {
            return best_discard(&analysis, ctx.papayoo_suit);
        }

        let winning_value = current_winner(trick, lead).map_or(0, |c| c.value);

        // Following the papayoo suit: protect the seven.
        if lead == ctx.papayoo_suit {
            let others: Vec<&CardAnalysis> = analysis
                .iter()
                .filter(|a| a.card.suit == lead && !a.is_papayoo)
                .collect();
            if !others.is_empty() {
                if let Some(best) = others
                    .iter()
                    .filter(|a| a.card.value < winning_value)
                    .max_by_key(|a| a.card.value)
                {
                    return best.card;
                }
                return others.iter().min_by_key(|a| a.card.value).map(|a| a.card)
                    .unwrap_or(analysis[0].card);
            }
        }

        // A Payoo trick: shed the biggest Payoo that still loses, else
        // win as cheaply as possible.
        if lead == Suit::Payoo {
            let payoos: Vec<&CardAnalysis> = analysis
                .iter()
                .filter(|a| a.card.suit == Suit::Payoo)
                .collect();
            if !payoos.is_empty() {
                if let Some(best) = payoos
                    .iter()
                    .filter(|a| a.card.value < winning_value)
                    .max_by_key(|a| a.card.value)
                {
                    return best.card;
                }
                if let Some(lowest) = payoos.iter().min_by_key(|a| a.card.value) {
                    return lowest.card;
                }
            }
        }

        // A worthless trick is free to take; last seat may grab it with
        // its highest non-papayoo card.
        if last && pts == 0 {
            if let Some(best) = analysis
                .iter()
                .filter(|a| a.would_win && !a.is_papayoo)
                .max_by_key(|a| a.card.value)
            {
                return best.card;
            }
        }

        // Pointed trick: dump the highest card that still loses.
        let losing: Vec<&CardAnalysis> = analysis
            .iter()
            .filter(|a| !a.would_win && !a.is_papayoo)
            .collect();
        if !losing.is_empty() {
            if pts > 0 || last {
                if let Some(best) = losing
                    .iter()
                    .min_by_key(|a| (a.points, std::cmp::Reverse(a.card.value)))
                {
                    return best.card;
                }
            }
            // Mid-trick with no points yet: shed high cards while safe.
            if let Some(best) = losing
                .iter()
                .max_by_key(|a| (a.card.value, std::cmp::Reverse(a.points)))
            {
                return best.card;
            }
        }

        // Forced to win (or only the papayoo loses): minimize damage.
        let candidates: Vec<&CardAnalysis> =
            non_empty_filter(&analysis, |a| !a.is_papayoo);
        candidates
            .iter()
            .min_by_key(|a| (a.total_risk, a.card.value, a.card.id))
            .map(|a| a.card)
            .unwrap_or(analysis[0].card)
    }
}

/// Filter, falling back to the unfiltered set when nothing survives.
fn non_empty_filter<'a>(
    analysis: &'a [CardAnalysis],
    pred: impl Fn(&CardAnalysis) -> bool,
) -> Vec<&'a CardAnalysis> {
    let filtered: Vec<&CardAnalysis> = analysis.iter().filter(|a| pred(a)).collect();
    if filtered.is_empty() {
        analysis.iter().collect()
    } else {
        filtered
    }
}

fn non_empty_refilter<'a>(
    current: Vec<&'a CardAnalysis>,
    pred: impl Fn(&CardAnalysis) -> bool,
) -> Vec<&'a CardAnalysis> {
    let filtered: Vec<&CardAnalysis> = current.iter().filter(|a| pred(a)).copied().collect();
    if filtered.is_empty() {
        current
    } else {
        filtered
    }
}

fn void_penalty(a: &CardAnalysis, weight: i32) -> i32 {
    if a.opponents_void {
        weight
    } else {
        0
    }
}

/// Discard priority when void in the led suit: big Payoo, then the
/// papayoo seven, then high classics, then any Payoo, then the highest
/// remaining card.
fn best_discard(analysis: &[CardAnalysis], papayoo_suit: Suit) -> Card {
    let payoos: Vec<&CardAnalysis> = analysis
        .iter()
        .filter(|a| a.card.suit == Suit::Payoo)
        .collect();
    if let Some(biggest) = payoos.iter().max_by_key(|a| a.card.value) {
        if biggest.card.value >= 10 {
            return biggest.card;
        }
    }
    if let Some(seven) = analysis
        .iter()
        .find(|a| is_papayoo_card(&a.card, papayoo_suit))
    {
        return seven.card;
    }
    if let Some(high) = analysis
        .iter()
        .filter(|a| a.card.suit != Suit::Payoo && a.card.value >= 8)
        .max_by_key(|a| a.card.value)
    {
        return high.card;
    }
    if let Some(payoo) = payoos.iter().max_by_key(|a| a.card.value) {
        return payoo.card;
    }
    analysis
        .iter()
        .max_by_key(|a| (a.card.value, a.card.id))
        .map(|a| a.card)
        .expect("discard requires a non-empty analysis")
}

impl BotPlayer for HeuristicBot {
    fn choose_pass(&self, hand: &[Card], count: usize) -> Vec<CardId> {
        let suit_counts = classic_suit_counts(hand);
        let mut scored: Vec<(i32, Card)> = hand
            .iter()
            .map(|c| (pass_danger(c, &suit_counts), *c))
            .collect();
        scored.sort_by_key(|(danger, card)| (std::cmp::Reverse(*danger), card.id));
        scored.into_iter().take(count).map(|(_, c)| c.id).collect()
    }

    fn choose_play(&self, ctx: &PlayContext<'_>) -> Option<Card> {
        let mut playable = legal_plays(ctx.hand, ctx.lead_suit);
        if playable.is_empty() {
            return None;
        }
        if playable.len() == 1 {
            return Some(playable[0]);
        }

        // When forced to follow the papayoo suit, keep the seven back
        // unless it is the only card of that suit.
        if ctx.lead_suit == Some(ctx.papayoo_suit) {
            let others: Vec<Card> = playable
                .iter()
                .filter(|c| c.suit == ctx.papayoo_suit && !is_papayoo_card(c, ctx.papayoo_suit))
                .copied()
                .collect();
            if playable.iter().any(|c| is_papayoo_card(c, ctx.papayoo_suit))
                && !others.is_empty()
            {
                playable = others;
            }
            if playable.len() == 1 {
                return Some(playable[0]);
            }
        }

        let analysis = self.analyze(&playable, ctx);
        let on_table = ctx.current_trick_cards.len();
        let card = if on_table == 0 {
            self.lead(analysis, ctx)
        } else {
            self.follow(analysis, ctx, on_table == ctx.player_count - 1)
        };
        Some(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VoidTable;

    fn card(id: u8, suit: Suit, value: u8) -> Card {
        Card { id, suit, value }
    }

    fn ctx<'a>(
        hand: &'a [Card],
        trick: &'a [Card],
        lead: Option<Suit>,
        voids: &'a VoidTable,
    ) -> PlayContext<'a> {
        PlayContext {
            hand,
            current_trick_cards: trick,
            lead_suit: lead,
            papayoo_suit: Suit::Heart,
            player_count: 4,
            player_id: "bot",
            voids,
        }
    }

    #[test]
    fn pass_prefers_dangerous_cards() {
        let hand = vec![
            card(0, Suit::Spade, 2),
            card(1, Suit::Spade, 7),
            card(2, Suit::Club, 3),
            card(3, Suit::Payoo, 18),
            card(4, Suit::Payoo, 2),
            card(5, Suit::Heart, 10),
        ];
        let picks = HeuristicBot.choose_pass(&hand, 3);
        assert_eq!(picks.len(), 3);
        // The big Payoo, the seven and the ten go; the baits stay.
        assert!(picks.contains(&3));
        assert!(picks.contains(&1));
        assert!(picks.contains(&5));
        assert!(!picks.contains(&4));
    }

    #[test]
    fn pass_penalizes_high_cards_in_short_suits() {
        let suit_counts = classic_suit_counts(&[
            card(0, Suit::Club, 9),
            card(1, Suit::Spade, 9),
            card(2, Suit::Spade, 3),
            card(3, Suit::Spade, 4),
        ]);
        let short = pass_danger(&card(0, Suit::Club, 9), &suit_counts);
        let long = pass_danger(&card(1, Suit::Spade, 9), &suit_counts);
        assert!(short > long);
    }

    #[test]
    fn never_opens_with_the_papayoo() {
        let hand = vec![card(0, Suit::Heart, 7), card(1, Suit::Spade, 4)];
        let voids = VoidTable::default();
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &[], None, &voids))
            .unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn protects_the_seven_when_following_its_suit() {
        let hand = vec![
            card(0, Suit::Heart, 7),
            card(1, Suit::Heart, 3),
            card(2, Suit::Club, 9),
        ];
        let trick = [card(10, Suit::Heart, 9)];
        let voids = VoidTable::default();
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Heart), &voids))
            .unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn sheds_highest_losing_card_on_a_pointed_trick() {
        let hand = vec![
            card(0, Suit::Spade, 2),
            card(1, Suit::Spade, 6),
            card(2, Suit::Spade, 9),
        ];
        // Spade 8 is winning and a Payoo 12 rides on the trick.
        let trick = [card(10, Suit::Spade, 8), card(11, Suit::Payoo, 12)];
        let voids = VoidTable::default();
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Spade), &voids))
            .unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn discard_priority_when_void() {
        let voids = VoidTable::default();
        // Big Payoo first.
        let hand = vec![
            card(0, Suit::Payoo, 14),
            card(1, Suit::Heart, 7),
            card(2, Suit::Club, 9),
        ];
        let trick = [card(10, Suit::Spade, 5)];
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Spade), &voids))
            .unwrap();
        assert_eq!(chosen.id, 0);

        // Then the papayoo seven.
        let hand = vec![
            card(0, Suit::Payoo, 4),
            card(1, Suit::Heart, 7),
            card(2, Suit::Club, 9),
        ];
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Spade), &voids))
            .unwrap();
        assert_eq!(chosen.id, 1);

        // Then high classics.
        let hand = vec![card(0, Suit::Payoo, 4), card(2, Suit::Club, 9)];
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Spade), &voids))
            .unwrap();
        assert_eq!(chosen.id, 2);
    }

    #[test]
    fn avoids_leading_suits_with_known_voids() {
        use crate::domain::TrickPlay;

        let hand = vec![card(0, Suit::Spade, 5), card(1, Suit::Club, 5)];
        // An observed off-suit discard marks an opponent void in spades.
        let voids = VoidTable::from_tricks(&[vec![
            TrickPlay {
                player_id: "other".into(),
                card: card(10, Suit::Spade, 2),
            },
            TrickPlay {
                player_id: "voided".into(),
                card: card(11, Suit::Heart, 2),
            },
        ]]);
        assert!(voids.is_void("voided", Suit::Spade));

        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &[], None, &voids))
            .unwrap();
        assert_eq!(chosen.suit, Suit::Club);
    }

    #[test]
    fn always_picks_a_legal_card() {
        let hand = vec![
            card(0, Suit::Spade, 1),
            card(1, Suit::Spade, 8),
            card(2, Suit::Heart, 7),
            card(3, Suit::Payoo, 19),
        ];
        let voids = VoidTable::default();
        let trick = [card(10, Suit::Spade, 4)];
        let chosen = HeuristicBot
            .choose_play(&ctx(&hand, &trick, Some(Suit::Spade), &voids))
            .unwrap();
        assert_eq!(chosen.suit, Suit::Spade);
    }
}
