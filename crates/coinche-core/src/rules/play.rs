use crate::error::RuleError;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Trump;
use crate::model::trick::{Play, Trick};

/// Cards the seat to move may legally play.
///
/// Follows the Coinche obligations: follow suit, raise on a trump lead,
/// otherwise trump (and overtrump) unless the partner is already master of
/// the trick.
pub fn legal_cards(trick: &Trick, trump: Trump) -> Result<Vec<Card>, RuleError> {
    let hand = trick.current_hand().ok_or(RuleError::TrickComplete)?;
    let whole_hand = hand.cards().to_vec();

    let Some(asked) = trick.lead_suit() else {
        return Ok(whole_hand);
    };

    let following = hand.of_suit(asked);
    let held_trumps = hand.trumps(trump);
    let best_played_trump = trick
        .cards()
        .filter(|card| card.is_trump(trump))
        .max_by_key(|card| card.rank.trump_strength());

    let Some(best_trump) = best_played_trump else {
        if !following.is_empty() {
            return Ok(following);
        }
        if partner_is_winning(trick, trump) {
            return Ok(whole_hand);
        }
        if !held_trumps.is_empty() {
            return Ok(held_trumps);
        }
        return Ok(whole_hand);
    };

    let overtrumps: Vec<Card> = held_trumps
        .into_iter()
        .filter(|card| card.rank.is_better_than(best_trump.rank, true))
        .collect();

    if trump.is_trump(asked) && !overtrumps.is_empty() {
        return Ok(overtrumps);
    }
    if !following.is_empty() {
        return Ok(following);
    }
    if partner_is_winning(trick, trump) {
        return Ok(whole_hand);
    }
    if !overtrumps.is_empty() {
        return Ok(overtrumps);
    }
    Ok(whole_hand)
}

/// Whether the partner of the seat to move has played and currently holds
/// the trick.
pub fn partner_is_winning(trick: &Trick, trump: Trump) -> bool {
    if trick.is_complete() {
        return false;
    }
    let partner = trick.current_position() - 2;
    if trick.card_of(partner).is_none() {
        return false;
    }
    leading_play(trick, trump).is_some_and(|play| play.position == partner)
}

/// Play currently taking the trick, complete or not.
pub fn leading_play(trick: &Trick, trump: Trump) -> Option<Play> {
    let led = trick.lead_suit()?;
    trick.plays().iter().copied().reduce(|best, play| {
        if play.card.beats(best.card, trump, led) {
            play
        } else {
            best
        }
    })
}

/// Card that takes a complete trick: the highest trump if any was played,
/// else the highest card of the suit led.
pub fn winning_card(trick: &Trick, trump: Trump) -> Result<Card, RuleError> {
    if !trick.is_complete() {
        return Err(RuleError::TrickIncomplete);
    }

    let best_trump = trick
        .cards()
        .filter(|card| card.is_trump(trump))
        .max_by_key(|card| card.rank.trump_strength());
    if let Some(card) = best_trump {
        return Ok(card);
    }

    let led = trick.lead_suit().ok_or(RuleError::TrickIncomplete)?;
    trick
        .cards()
        .filter(|card| card.suit == led)
        .max_by_key(|card| card.rank.plain_strength())
        .ok_or(RuleError::TrickIncomplete)
}

pub fn trick_winner(trick: &Trick, trump: Trump) -> Result<PlayerPosition, RuleError> {
    let card = winning_card(trick, trump)?;
    trick.position_of(card).ok_or(RuleError::TrickIncomplete)
}

/// Trick with `card` played by the seat to move, rejecting anything
/// outside [`legal_cards`].
pub fn advance_trick(trick: &Trick, trump: Trump, card: Card) -> Result<Trick, RuleError> {
    let legal = legal_cards(trick, trump)?;
    if !legal.contains(&card) {
        return Err(RuleError::IllegalCard {
            seat: trick.current_position(),
            card,
            legal,
        });
    }
    trick.with_card(card)
}
