use crate::model::player::PlayerPosition;
use crate::rules::bidding::BiddingRules;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINNING_SCORE: u32 = 1001;

/// Per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_winning_score")]
    pub winning_score: u32,
    #[serde(default = "default_first_dealer")]
    pub first_dealer: PlayerPosition,
    #[serde(default)]
    pub rules: BiddingRules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            winning_score: default_winning_score(),
            first_dealer: default_first_dealer(),
            rules: BiddingRules::default(),
        }
    }
}

impl GameConfig {
    pub fn with_winning_score(mut self, winning_score: u32) -> Self {
        self.winning_score = winning_score;
        self
    }

    pub fn with_first_dealer(mut self, seat: PlayerPosition) -> Self {
        self.first_dealer = seat;
        self
    }

    pub fn with_rules(mut self, rules: BiddingRules) -> Self {
        self.rules = rules;
        self
    }
}

fn default_winning_score() -> u32 {
    DEFAULT_WINNING_SCORE
}

fn default_first_dealer() -> PlayerPosition {
    PlayerPosition::North
}
