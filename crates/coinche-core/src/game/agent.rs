use crate::game::events::GameEvent;
use crate::model::bid::{BiddingEntry, BiddingStep};
use crate::model::card::Card;
use crate::model::player::PlayerPosition;

/// Decision maker for one seat.
///
/// The orchestrator asks exactly one question at a time and validates the
/// answer; an agent never mutates game state itself.
pub trait Agent {
    fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep;

    /// `legal` is never empty.
    fn propose_card(&mut self, seat: PlayerPosition, legal: &[Card]) -> Card;

    /// Called after every transition. Best effort; the default ignores it.
    fn on_state_changed(&mut self, _event: &GameEvent) {}
}
