use super::{BotContext, card_sort_key, count_cards_in_suit};
use coinche_core::model::card::Card;
use coinche_core::model::rank::Rank;
use coinche_core::model::suit::Trump;
use coinche_core::model::trick::Trick;
use coinche_core::rules::play;
use std::cmp::Ordering;

pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(legal: &[Card], ctx: &BotContext<'_>) -> Option<Card> {
        if legal.is_empty() {
            return None;
        }
        let (Some(trump), Some(trick)) = (ctx.trump(), ctx.trick()) else {
            return legal.first().copied();
        };

        let mut best: Option<(Card, i32)> = None;
        for &card in legal {
            let score = if trick.plays().is_empty() {
                lead_score(card, trump, ctx)
            } else {
                follow_score(card, trump, trick, ctx)
            };

            match best {
                None => best = Some((card, score)),
                Some((best_card, best_score)) => {
                    if score > best_score
                        || (score == best_score
                            && card_sort_key(card).cmp(&card_sort_key(best_card)) == Ordering::Less)
                    {
                        best = Some((card, score));
                    }
                }
            }
        }

        best.map(|(card, _)| card)
    }
}

fn lead_score(card: Card, trump: Trump, ctx: &BotContext<'_>) -> i32 {
    let params = ctx.params;
    let points = card.points(trump) as i32;

    if card.is_trump(trump) {
        // Attackers draw trumps from the top while they are still out.
        if ctx.is_attacking() && card.rank == Rank::Jack && ctx.trumps_played() < 8 {
            return params.play_lead_master_bonus * 2;
        }
        return if ctx.is_attacking() { -points / 2 } else { -points * 2 };
    }

    if card.rank == Rank::Ace {
        return params.play_lead_master_bonus + points;
    }

    // Otherwise lead something cheap from a long suit.
    let length = count_cards_in_suit(ctx.hand(), card.suit) as i32;
    length * 2 - points
}

fn follow_score(card: Card, trump: Trump, trick: &Trick, ctx: &BotContext<'_>) -> i32 {
    let params = ctx.params;
    let points = card.points(trump) as i32;

    if play::partner_is_winning(trick, trump) {
        let mut score = points * params.play_feed_partner_mult;
        if card.is_trump(trump) {
            score += params.play_waste_trump_penalty;
        }
        return score;
    }

    let takes_lead = match (play::leading_play(trick, trump), trick.lead_suit()) {
        (Some(leading), Some(led)) => card.beats(leading.card, trump, led),
        _ => true,
    };

    if takes_lead {
        let on_table: i32 = trick.cards().map(|c| c.points(trump) as i32).sum();
        // Cheapest winner first: strength costs a little.
        let strength = if card.is_trump(trump) {
            card.rank.trump_strength() as i32 + 8
        } else {
            card.rank.plain_strength() as i32
        };
        params.play_win_bonus + on_table - strength
    } else {
        points * params.play_discard_points_mult
            + if card.is_trump(trump) {
                params.play_waste_trump_penalty
            } else {
                0
            }
    }
}
