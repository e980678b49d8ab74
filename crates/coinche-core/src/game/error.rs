use crate::error::RuleError;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use thiserror::Error;

/// Failures that abort a game run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no agent registered for {seat}")]
    UnregisteredSeat { seat: PlayerPosition },
    #[error("{seat} proposed {card}, which is not a legal card")]
    IllegalCard { seat: PlayerPosition, card: Card },
    #[error("round tallied {actual} trick points, expected {expected}")]
    PointTotal { expected: u32, actual: u32 },
    #[error("game is already over")]
    GameOver,
    #[error(transparent)]
    Rule(#[from] RuleError),
}
