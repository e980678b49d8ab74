use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    NewGame,
    NewRound,
    NewBidding,
    NewBiddingStep,
    EndBidding,
    NewTrick,
    AdvanceTrick,
    EndTrick,
    EndRound,
    EndGame,
}

impl Transition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Transition::NewGame => "new_game",
            Transition::NewRound => "new_round",
            Transition::NewBidding => "new_bidding",
            Transition::NewBiddingStep => "new_bidding_step",
            Transition::EndBidding => "end_bidding",
            Transition::NewTrick => "new_trick",
            Transition::AdvanceTrick => "advance_trick",
            Transition::EndTrick => "end_trick",
            Transition::EndRound => "end_round",
            Transition::EndGame => "end_game",
        }
    }
}

/// A state change together with the game as it stands afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub transition: Transition,
    pub game: GameState,
}

impl GameEvent {
    pub fn new(transition: Transition, game: GameState) -> Self {
        Self { transition, game }
    }

    /// A bid is now awaited from someone.
    pub fn should_bid(&self) -> bool {
        matches!(
            self.transition,
            Transition::NewBidding | Transition::NewBiddingStep
        ) && self.game.awaiting_bid_from().is_some()
    }

    /// A card is now awaited from someone.
    pub fn should_play(&self) -> bool {
        matches!(
            self.transition,
            Transition::NewTrick | Transition::AdvanceTrick
        ) && self.game.awaiting_card_from().is_some()
    }
}

pub trait Observer {
    fn notify(&mut self, event: &GameEvent);
}

impl Observer for Sender<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        // A dropped receiver just stops listening.
        let _ = self.send(event.clone());
    }
}

/// In-memory recorder. Clones share the same buffer, so one handle can be
/// subscribed while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.lock().clone()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.lock().iter().map(|event| event.transition).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic in another holder leaves the buffer intact; keep recording.
    fn lock(&self) -> MutexGuard<'_, Vec<GameEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.lock().push(event.clone());
    }
}
