use crate::bot::{BidPlanner, BotContext, BotDifficulty, BotParams, PlayPlanner};
use coinche_core::game::agent::Agent;
use coinche_core::game::events::GameEvent;
use coinche_core::game::state::GameState;
use coinche_core::model::bid::{BiddingEntry, BiddingStep};
use coinche_core::model::card::Card;
use coinche_core::model::player::PlayerPosition;
use tracing::{Level, event};

/// Rule-of-thumb player. Keeps the latest game snapshot from
/// `on_state_changed` so it can see its hand and the trick on the table.
pub struct HeuristicAgent {
    difficulty: BotDifficulty,
    params: BotParams,
    game: Option<GameState>,
}

impl HeuristicAgent {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            params: BotParams::default(),
            game: None,
        }
    }

    pub fn easy() -> Self {
        Self::new(BotDifficulty::Easy)
    }

    pub fn normal() -> Self {
        Self::new(BotDifficulty::Normal)
    }

    pub fn with_params(mut self, params: BotParams) -> Self {
        self.params = params;
        self
    }

    fn context(&self, seat: PlayerPosition) -> Option<BotContext<'_>> {
        let round = self.game.as_ref()?.current_round()?;
        Some(BotContext::new(seat, round, self.difficulty, &self.params))
    }
}

impl Agent for HeuristicAgent {
    fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
        if matches!(self.difficulty, BotDifficulty::Easy) {
            return BiddingStep::Pass;
        }
        let Some(ctx) = self.context(seat) else {
            return BiddingStep::Pass;
        };
        let step = BidPlanner::choose(seat, ctx.hand(), history, &self.params);
        log_bid_decision(seat, self.difficulty, history.len(), step);
        step
    }

    fn propose_card(&mut self, seat: PlayerPosition, legal: &[Card]) -> Card {
        let fallback = legal[0];
        if matches!(self.difficulty, BotDifficulty::Easy) {
            return fallback;
        }
        let card = self
            .context(seat)
            .and_then(|ctx| PlayPlanner::choose(legal, &ctx))
            .unwrap_or(fallback);
        log_play_decision(seat, self.difficulty, legal, card);
        card
    }

    fn on_state_changed(&mut self, event: &GameEvent) {
        self.game = Some(event.game.clone());
    }
}

fn log_bid_decision(
    seat: PlayerPosition,
    difficulty: BotDifficulty,
    history_len: usize,
    step: BiddingStep,
) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "coinche_bot::bid",
        Level::DEBUG,
        seat = %seat,
        difficulty = ?difficulty,
        history_len,
        step = %step,
    );
}

fn log_play_decision(seat: PlayerPosition, difficulty: BotDifficulty, legal: &[Card], chosen: Card) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }

    let legal_preview = if legal.len() <= 6 {
        legal
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal.len())
    };

    event!(
        target: "coinche_bot::play",
        Level::DEBUG,
        seat = %seat,
        difficulty = ?difficulty,
        legal_count = legal.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
    );
}
