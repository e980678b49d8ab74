use super::state::GameState;
use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::score::Score;
use serde::{Deserialize, Serialize};

/// Compact view of a game for logs and observers. Not meant for restoring a
/// game; the full [`GameState`] is itself serialisable for that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub round_number: usize,
    pub dealer: PlayerPosition,
    pub score: Score,
    pub winning_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Bid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub belote: Option<PlayerPosition>,
    #[serde(default)]
    pub round_points: Score,
    #[serde(default)]
    pub trick: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_bid: Option<PlayerPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_play: Option<PlayerPosition>,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let round = state.current_round();
        GameSnapshot {
            round_number: state.round_number(),
            dealer: state.dealer(),
            score: state.score(),
            winning_score: state.winning_score(),
            contract: round.and_then(|round| round.contract().copied()),
            belote: round.and_then(|round| round.belote()),
            round_points: round.map(|round| round.points()).unwrap_or_default(),
            trick: round
                .and_then(|round| round.current_trick())
                .map(|trick| trick.cards().collect())
                .unwrap_or_default(),
            to_bid: state.awaiting_bid_from(),
            to_play: state.awaiting_card_from(),
        }
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
