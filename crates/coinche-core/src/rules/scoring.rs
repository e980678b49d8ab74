use crate::error::RuleError;
use crate::model::bid::{Bid, BidKind};
use crate::model::player::PlayerPosition;
use crate::model::round::RoundState;
use crate::model::score::Score;
use crate::model::suit::Trump;
use crate::model::trick::Trick;
use crate::rules::{bidding, play};

pub const LAST_TRICK_BONUS: u32 = 10;
pub const BELOTE_BONUS: u32 = 20;
pub const DECK_POINTS: u32 = 162;
pub const CAPOT_VALUE: u32 = 250;
pub const GENERALE_VALUE: u32 = 500;
pub const FAILED_CONTRACT_PENALTY: u32 = 160;

/// Card points of a completed trick, credited to `winner`'s team.
pub fn trick_points(
    trick: &Trick,
    trump: Trump,
    winner: PlayerPosition,
    is_last_trick: bool,
) -> Result<Score, RuleError> {
    if !trick.is_complete() {
        return Err(RuleError::TrickIncomplete);
    }
    let mut points: u32 = trick.cards().map(|card| card.points(trump)).sum();
    if is_last_trick {
        points += LAST_TRICK_BONUS;
    }
    Ok(Score::for_seat(winner, points))
}

/// Winning seat of every completed trick, in play order.
pub fn trick_winners(round: &RoundState) -> Result<Vec<PlayerPosition>, RuleError> {
    let trump = round.trump().ok_or(RuleError::NoContract)?;
    round
        .tricks()
        .iter()
        .filter(|trick| trick.is_complete())
        .map(|trick| play::trick_winner(trick, trump))
        .collect()
}

/// Final split of a finished round between the two teams.
pub fn round_score(round: &RoundState) -> Result<Score, RuleError> {
    if !round.is_done() {
        return Err(RuleError::RoundIncomplete);
    }
    if round.is_void() {
        return Ok(Score::ZERO);
    }
    let contract = round.contract().ok_or(RuleError::NoContract)?;
    let winners = trick_winners(round)?;
    settle_contract(contract, round.points(), &winners, round.belote())
}

pub fn contract_value(kind: BidKind) -> u32 {
    match kind {
        BidKind::Contract(points) => points,
        BidKind::Capot => CAPOT_VALUE,
        BidKind::Generale => GENERALE_VALUE,
    }
}

/// Whether the attacking side fulfilled `contract` given the trick tally
/// (belote included) and the seat that won each trick.
pub fn contract_fulfilled(
    contract: &Bid,
    attacker_points: u32,
    winners: &[PlayerPosition],
) -> bool {
    let bidder = contract.position;
    match contract.kind {
        BidKind::Contract(target) => attacker_points >= target,
        BidKind::Capot => winners.iter().all(|seat| seat.team() == bidder.team()),
        BidKind::Generale => winners.iter().all(|seat| *seat == bidder),
    }
}

/// Applies contract, coinche multiplier and belote to a round's trick tally.
///
/// Point contracts outside the biddable range are refused rather than
/// multiplied.
pub fn settle_contract(
    contract: &Bid,
    tally: Score,
    winners: &[PlayerPosition],
    belote: Option<PlayerPosition>,
) -> Result<Score, RuleError> {
    bidding::check_contract_kind(contract.kind)?;
    let attackers = contract.position.team();
    let belote_score = belote
        .map(|seat| Score::for_seat(seat, BELOTE_BONUS))
        .unwrap_or(Score::ZERO);

    let attacker_points = tally.team(attackers) + belote_score.team(attackers);
    let multiplier = contract.coinche.multiplier();
    let value = contract_value(contract.kind)
        .checked_mul(multiplier)
        .ok_or(RuleError::ContractOutOfRange {
            points: contract_value(contract.kind),
        })?;

    let outcome = if contract_fulfilled(contract, attacker_points, winners) {
        Score::for_team(attackers, value)
    } else if multiplier == 1 {
        Score::for_team(attackers.opponent(), FAILED_CONTRACT_PENALTY)
    } else {
        Score::for_team(attackers.opponent(), value)
    };

    Ok(outcome + belote_score)
}
