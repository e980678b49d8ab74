use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use thiserror::Error;

/// Rule violations raised by the trick, bidding and scoring layers.
///
/// The first group are precondition failures: a query was made in a phase
/// where it has no meaning. The second group are illegal moves proposed by
/// a player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("trick is not complete yet")]
    TrickIncomplete,
    #[error("round is not complete yet")]
    RoundIncomplete,
    #[error("round was already scored")]
    RoundAlreadyScored,
    #[error("bidding is still open")]
    BiddingOpen,
    #[error("bidding is already closed")]
    BiddingClosed,
    #[error("no contract was bid this round")]
    NoContract,
    #[error("expected {expected} to speak but the bid names {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{seat} cannot play {card}; legal cards are {legal:?}")]
    IllegalCard {
        seat: PlayerPosition,
        card: Card,
        legal: Vec<Card>,
    },
    #[error("{seat} does not hold {card}")]
    CardNotInHand { seat: PlayerPosition, card: Card },
    #[error("bid does not outrank the standing contract")]
    BidTooLow,
    #[error("contract of {points} points is not a multiple of 10 between 80 and 180")]
    ContractOutOfRange { points: u32 },
    #[error("coinche does not match the standing bid")]
    InvalidCoinche,
}
