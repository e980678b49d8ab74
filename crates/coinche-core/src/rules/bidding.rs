use crate::error::RuleError;
use crate::model::bid::{Bid, BidKind, BiddingEntry, BiddingStep, CoincheStatus};
use crate::model::player::PlayerPosition;
use serde::{Deserialize, Serialize};

/// House rules for the auction.
///
/// Both checks are off by default: the base rules only enforce speaking
/// order for plain bids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiddingRules {
    /// A new bid must outrank the standing one (contracts by points, then
    /// capot, then generale).
    pub require_increasing_contracts: bool,
    /// A coinche must repeat the standing bid raised exactly one level;
    /// only the defenders may coinche and only the attackers may surcoinche.
    pub restrict_coinche: bool,
}

impl BiddingRules {
    pub const fn strict() -> Self {
        Self {
            require_increasing_contracts: true,
            restrict_coinche: true,
        }
    }
}

pub const MIN_CONTRACT: u32 = 80;
pub const MAX_CONTRACT: u32 = 180;
pub const CONTRACT_STEP: u32 = 10;

/// Point contracts run from 80 to 180 in steps of 10. Capot and generale
/// carry fixed values and always pass.
pub fn check_contract_kind(kind: BidKind) -> Result<(), RuleError> {
    match kind {
        BidKind::Contract(points)
            if !(MIN_CONTRACT..=MAX_CONTRACT).contains(&points)
                || points % CONTRACT_STEP != 0 =>
        {
            Err(RuleError::ContractOutOfRange { points })
        }
        _ => Ok(()),
    }
}

/// Seat expected to speak next: the opener, then around the table.
pub fn next_speaker(history: &[BiddingEntry], opener: PlayerPosition) -> PlayerPosition {
    history
        .last()
        .map(|entry| entry.speaker.next())
        .unwrap_or(opener)
}

/// The auction closes once at least four steps were spoken and the last
/// three were all passes. Four opening passes close it as a void deal.
pub fn bidding_is_over(history: &[BiddingEntry]) -> bool {
    history.len() >= 4
        && history[history.len() - 3..]
            .iter()
            .all(|entry| entry.step.is_pass())
}

pub fn should_continue_bidding(history: &[BiddingEntry]) -> bool {
    !bidding_is_over(history)
}

/// Every step spoken was a pass.
pub fn all_passed(history: &[BiddingEntry]) -> bool {
    history.iter().all(|entry| entry.step.is_pass())
}

/// Latest bid in the auction, carrying any coinche applied to it.
pub fn standing_bid(history: &[BiddingEntry]) -> Option<&Bid> {
    history.iter().rev().find_map(|entry| entry.step.bid())
}

pub fn validate_step(
    history: &[BiddingEntry],
    speaker: PlayerPosition,
    step: &BiddingStep,
    rules: BiddingRules,
) -> Result<(), RuleError> {
    if bidding_is_over(history) {
        return Err(RuleError::BiddingClosed);
    }

    let bid = match step {
        BiddingStep::Pass => return Ok(()),
        BiddingStep::Bid(bid) => bid,
    };
    check_contract_kind(bid.kind)?;
    let standing = standing_bid(history);

    match bid.coinche {
        CoincheStatus::None => {
            if bid.position != speaker {
                return Err(RuleError::OutOfTurn {
                    expected: speaker,
                    actual: bid.position,
                });
            }
            if rules.require_increasing_contracts {
                if let Some(standing) = standing {
                    if standing.coinche != CoincheStatus::None || !outranks(bid, standing) {
                        return Err(RuleError::BidTooLow);
                    }
                }
            }
        }
        CoincheStatus::Coinche | CoincheStatus::Surcoinche => {
            if rules.restrict_coinche {
                validate_coinche(bid, standing, speaker)?;
            }
        }
    }

    Ok(())
}

fn validate_coinche(
    bid: &Bid,
    standing: Option<&Bid>,
    speaker: PlayerPosition,
) -> Result<(), RuleError> {
    let standing = standing.ok_or(RuleError::InvalidCoinche)?;
    if !bid.same_contract(standing) || standing.coinche.raised() != Some(bid.coinche) {
        return Err(RuleError::InvalidCoinche);
    }

    let attackers = bid.position.team();
    let allowed = match bid.coinche {
        CoincheStatus::Coinche => speaker.team() != attackers,
        CoincheStatus::Surcoinche => speaker.team() == attackers,
        CoincheStatus::None => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(RuleError::InvalidCoinche)
    }
}

fn outranks(bid: &Bid, standing: &Bid) -> bool {
    kind_rank(bid.kind) > kind_rank(standing.kind)
}

fn kind_rank(kind: BidKind) -> (u8, u32) {
    match kind {
        BidKind::Contract(points) => (0, points),
        BidKind::Capot => (1, 0),
        BidKind::Generale => (2, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BiddingRules, bidding_is_over, check_contract_kind, next_speaker, should_continue_bidding,
        standing_bid, validate_step,
    };
    use crate::error::RuleError;
    use crate::model::bid::{Bid, BidKind, BiddingEntry, BiddingStep, CoincheStatus};
    use crate::model::player::PlayerPosition;
    use crate::model::suit::{Suit, Trump};

    const HEARTS: Trump = Trump::Suit(Suit::Hearts);

    fn history(opener: PlayerPosition, steps: &[BiddingStep]) -> Vec<BiddingEntry> {
        steps
            .iter()
            .enumerate()
            .map(|(i, step)| BiddingEntry::new(opener + i, *step))
            .collect()
    }

    fn bid(seat: PlayerPosition, points: u32) -> BiddingStep {
        BiddingStep::Bid(Bid::contract(seat, HEARTS, points))
    }

    #[test]
    fn four_passes_close_the_auction() {
        let steps = [BiddingStep::Pass; 4];
        let h = history(PlayerPosition::North, &steps);
        assert!(!bidding_is_over(&h[..3]));
        assert!(bidding_is_over(&h));
        assert!(standing_bid(&h).is_none());
    }

    #[test]
    fn three_passes_after_a_bid_close_the_auction() {
        let steps = [
            bid(PlayerPosition::North, 80),
            BiddingStep::Pass,
            BiddingStep::Pass,
            BiddingStep::Pass,
        ];
        let h = history(PlayerPosition::North, &steps);
        assert!(bidding_is_over(&h));
        assert_eq!(standing_bid(&h).unwrap().position, PlayerPosition::North);
    }

    #[test]
    fn auction_continues_while_bids_keep_coming() {
        let steps = [
            BiddingStep::Pass,
            bid(PlayerPosition::East, 80),
            BiddingStep::Pass,
            bid(PlayerPosition::West, 90),
            BiddingStep::Pass,
        ];
        let h = history(PlayerPosition::North, &steps);
        assert!(should_continue_bidding(&h));
        assert_eq!(next_speaker(&h, PlayerPosition::North), PlayerPosition::West);
    }

    #[test]
    fn plain_bid_must_come_from_the_speaker() {
        let err = validate_step(
            &[],
            PlayerPosition::North,
            &bid(PlayerPosition::East, 80),
            BiddingRules::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RuleError::OutOfTurn {
                expected: PlayerPosition::North,
                actual: PlayerPosition::East
            }
        );
    }

    #[test]
    fn coinche_may_name_another_seat() {
        let h = history(PlayerPosition::North, &[bid(PlayerPosition::North, 80)]);
        let coinche = Bid::contract(PlayerPosition::North, HEARTS, 80)
            .with_coinche(CoincheStatus::Coinche);
        assert!(
            validate_step(
                &h,
                PlayerPosition::East,
                &BiddingStep::Bid(coinche),
                BiddingRules::strict()
            )
            .is_ok()
        );
    }

    #[test]
    fn strict_rules_reject_partner_coinche() {
        let h = history(
            PlayerPosition::North,
            &[bid(PlayerPosition::North, 80), BiddingStep::Pass],
        );
        let coinche = Bid::contract(PlayerPosition::North, HEARTS, 80)
            .with_coinche(CoincheStatus::Coinche);
        assert_eq!(
            validate_step(
                &h,
                PlayerPosition::South,
                &BiddingStep::Bid(coinche),
                BiddingRules::strict()
            ),
            Err(RuleError::InvalidCoinche)
        );
        assert!(
            validate_step(
                &h,
                PlayerPosition::South,
                &BiddingStep::Bid(coinche),
                BiddingRules::default()
            )
            .is_ok()
        );
    }

    #[test]
    fn strict_rules_require_increasing_bids() {
        let h = history(PlayerPosition::North, &[bid(PlayerPosition::North, 100)]);
        let rules = BiddingRules::strict();
        assert_eq!(
            validate_step(&h, PlayerPosition::East, &bid(PlayerPosition::East, 90), rules),
            Err(RuleError::BidTooLow)
        );
        assert!(
            validate_step(&h, PlayerPosition::East, &bid(PlayerPosition::East, 110), rules)
                .is_ok()
        );
        let capot = BiddingStep::Bid(Bid::new(PlayerPosition::East, HEARTS, BidKind::Capot));
        assert!(validate_step(&h, PlayerPosition::East, &capot, rules).is_ok());
        assert!(
            validate_step(
                &h,
                PlayerPosition::East,
                &bid(PlayerPosition::East, 90),
                BiddingRules::default()
            )
            .is_ok()
        );
    }

    #[test]
    fn closed_auction_rejects_further_steps() {
        let h = history(PlayerPosition::North, &[BiddingStep::Pass; 4]);
        assert_eq!(
            validate_step(
                &h,
                PlayerPosition::North,
                &BiddingStep::Pass,
                BiddingRules::default()
            ),
            Err(RuleError::BiddingClosed)
        );
    }

    #[test]
    fn contracts_outside_the_ladder_are_refused() {
        for points in [0, 70, 85, 190, 1000, u32::MAX] {
            assert_eq!(
                validate_step(
                    &[],
                    PlayerPosition::North,
                    &bid(PlayerPosition::North, points),
                    BiddingRules::default()
                ),
                Err(RuleError::ContractOutOfRange { points })
            );
        }
        for points in [80, 120, 180] {
            assert!(check_contract_kind(BidKind::Contract(points)).is_ok());
        }
        assert!(check_contract_kind(BidKind::Generale).is_ok());
    }

    #[test]
    fn alternating_bids_and_passes_keep_the_auction_open() {
        // A pass sits among the last three steps but the auction goes on
        // until three passes follow the latest bid.
        let steps = [
            bid(PlayerPosition::North, 80),
            BiddingStep::Pass,
            bid(PlayerPosition::South, 90),
            BiddingStep::Pass,
        ];
        let h = history(PlayerPosition::North, &steps);
        assert!(!bidding_is_over(&h));
        assert!(should_continue_bidding(&h));
        assert_eq!(next_speaker(&h, PlayerPosition::North), PlayerPosition::North);

        let mut closed = h.clone();
        closed.extend(history(
            PlayerPosition::North,
            &[BiddingStep::Pass, BiddingStep::Pass],
        ));
        assert!(bidding_is_over(&closed));
        assert_eq!(standing_bid(&closed).unwrap().kind, BidKind::Contract(90));
    }
}
