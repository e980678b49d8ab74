use crate::game::agent::Agent;
use crate::game::config::GameConfig;
use crate::game::error::GameError;
use crate::game::events::{GameEvent, Observer, Transition};
use crate::game::state::GameState;
use crate::model::deck::Deck;
use crate::model::player::{PlayerPosition, Team};
use crate::model::score::Score;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

const TARGET: &str = "coinche_core::game";

/// Summary returned by [`Orchestrator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub score: Score,
    pub winner: Option<Team>,
    pub rounds: usize,
    pub void_rounds: usize,
    pub round_scores: Vec<Score>,
}

/// Drives one game: asks each seat's agent for decisions, applies them and
/// broadcasts every transition.
pub struct Orchestrator {
    agents: [Option<Box<dyn Agent>>; 4],
    observers: Vec<Box<dyn Observer>>,
    rng: StdRng,
    state: GameState,
}

impl Orchestrator {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            agents: [None, None, None, None],
            observers: Vec::new(),
            rng,
            state: GameState::new(&config),
        }
    }

    /// Seats `agent` at `seat`, replacing any previous one.
    pub fn register(&mut self, seat: PlayerPosition, agent: Box<dyn Agent>) {
        self.agents[seat.index()] = Some(agent);
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays rounds until one team reaches the winning score.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        if self.state.is_done() {
            return Err(GameError::GameOver);
        }
        self.emit(Transition::NewGame);

        let mut round_scores = Vec::new();
        let mut void_rounds = 0;
        while !self.state.is_done() {
            let (round_score, void) = self.play_round()?;
            round_scores.push(round_score);
            if void {
                void_rounds += 1;
            }
        }

        self.emit(Transition::EndGame);
        let outcome = GameOutcome {
            score: self.state.score(),
            winner: self.state.winner(),
            rounds: self.state.round_number(),
            void_rounds,
            round_scores,
        };
        event!(
            target: TARGET,
            Level::INFO,
            rounds = outcome.rounds,
            void_rounds,
            north_south = outcome.score.north_south,
            east_west = outcome.score.east_west,
            winner = ?outcome.winner,
            "game over"
        );
        Ok(outcome)
    }

    /// Deals, bids and plays one round. Returns its score and whether it
    /// was voided by four passes.
    pub fn play_round(&mut self) -> Result<(Score, bool), GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.state = self.state.with_new_round(&deck)?;
        self.emit(Transition::NewRound);

        self.run_bidding()?;

        let void = self
            .state
            .current_round()
            .is_some_and(|round| round.is_void());
        if !void {
            while self
                .state
                .current_round()
                .is_some_and(|round| !round.are_empty_handed())
            {
                self.run_trick()?;
            }
        }

        let (state, round_score) = self.state.finish_round()?;
        self.state = state;
        event!(
            target: TARGET,
            Level::INFO,
            round = self.state.round_number(),
            void,
            north_south = round_score.north_south,
            east_west = round_score.east_west,
            total_north_south = self.state.score().north_south,
            total_east_west = self.state.score().east_west,
            "round scored"
        );
        self.emit(Transition::EndRound);
        Ok((round_score, void))
    }

    fn run_bidding(&mut self) -> Result<(), GameError> {
        self.emit(Transition::NewBidding);

        while let Some(seat) = self.state.awaiting_bid_from() {
            let history = self
                .state
                .current_round()
                .map(|round| round.bidding().to_vec())
                .unwrap_or_default();
            let step = self.agent(seat)?.propose_bid(seat, &history);

            self.state = self.state.apply_bidding_step(step).map_err(|err| {
                event!(
                    target: TARGET,
                    Level::WARN,
                    seat = %seat,
                    step = %step,
                    error = %err,
                    "rejected bidding step"
                );
                err
            })?;
            event!(target: TARGET, Level::DEBUG, seat = %seat, step = %step, "bidding step");
            self.emit(Transition::NewBiddingStep);
        }

        if let Some(contract) = self.state.current_round().and_then(|round| round.contract()) {
            event!(target: TARGET, Level::INFO, contract = %contract, "bidding closed");
        } else {
            event!(target: TARGET, Level::INFO, "bidding closed without a contract");
        }
        self.emit(Transition::EndBidding);
        Ok(())
    }

    fn run_trick(&mut self) -> Result<(), GameError> {
        self.state = self.state.with_new_trick()?;
        self.emit(Transition::NewTrick);

        while let Some(seat) = self.state.awaiting_card_from() {
            let legal = self.state.legal_cards()?;
            let card = self.agent(seat)?.propose_card(seat, &legal);
            if !legal.contains(&card) {
                event!(
                    target: TARGET,
                    Level::WARN,
                    seat = %seat,
                    card = %card,
                    legal = ?legal,
                    "rejected illegal card"
                );
                return Err(GameError::IllegalCard { seat, card });
            }
            self.state = self.state.play_card(card)?;
            self.emit(Transition::AdvanceTrick);
        }

        let (state, settlement) = self.state.settle_trick()?;
        self.state = state;
        event!(
            target: TARGET,
            Level::DEBUG,
            winner = %settlement.winner,
            points = settlement.points.total(),
            last_trick = settlement.last_trick,
            "trick settled"
        );
        self.emit(Transition::EndTrick);
        Ok(())
    }

    fn agent(&mut self, seat: PlayerPosition) -> Result<&mut Box<dyn Agent>, GameError> {
        self.agents[seat.index()]
            .as_mut()
            .ok_or(GameError::UnregisteredSeat { seat })
    }

    fn emit(&mut self, transition: Transition) {
        let event = GameEvent::new(transition, self.state.clone());
        for observer in &mut self.observers {
            observer.notify(&event);
        }
        for agent in self.agents.iter_mut().flatten() {
            agent.on_state_changed(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Orchestrator;
    use crate::game::agent::Agent;
    use crate::game::config::GameConfig;
    use crate::game::error::GameError;
    use crate::game::events::{EventLog, Transition};
    use crate::model::bid::{Bid, BiddingEntry, BiddingStep};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::player::PlayerPosition;
    use crate::model::suit::{Suit, Trump};

    /// Passes unless told to open; always plays the first legal card.
    struct FirstLegal {
        opens: bool,
    }

    impl Agent for FirstLegal {
        fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
            if self.opens && history.iter().all(|entry| entry.step.is_pass()) {
                BiddingStep::Bid(Bid::contract(seat, Trump::Suit(Suit::Spades), 80))
            } else {
                BiddingStep::Pass
            }
        }

        fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
            legal[0]
        }
    }

    /// Opens with a no-trump bid, then always plays a card outside the legal set.
    struct Cheater;

    impl Agent for Cheater {
        fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
            if history.is_empty() {
                BiddingStep::Bid(Bid::contract(seat, Trump::NoTrump, 80))
            } else {
                BiddingStep::Pass
            }
        }

        fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
            Deck::standard()
                .cards()
                .iter()
                .copied()
                .find(|card| !legal.contains(card))
                .unwrap()
        }
    }

    fn seat_all(orchestrator: &mut Orchestrator, opener: Option<PlayerPosition>) {
        for seat in PlayerPosition::LOOP {
            orchestrator.register(
                seat,
                Box::new(FirstLegal {
                    opens: opener == Some(seat),
                }),
            );
        }
    }

    #[test]
    fn missing_agent_is_reported() {
        let mut orchestrator = Orchestrator::new(GameConfig::default(), 1);
        orchestrator.register(PlayerPosition::North, Box::new(FirstLegal { opens: false }));
        assert_eq!(
            orchestrator.run(),
            Err(GameError::UnregisteredSeat {
                seat: PlayerPosition::East
            })
        );
    }

    #[test]
    fn game_runs_to_the_winning_score() {
        let config = GameConfig::default().with_winning_score(300);
        let mut orchestrator = Orchestrator::new(config, 7);
        seat_all(&mut orchestrator, Some(PlayerPosition::North));
        let log = EventLog::new();
        orchestrator.subscribe(Box::new(log.clone()));

        let outcome = orchestrator.run().unwrap();
        assert!(outcome.score.north_south >= 300 || outcome.score.east_west >= 300);
        assert!(outcome.winner.is_some());
        assert_eq!(outcome.round_scores.len(), outcome.rounds);

        let transitions = log.transitions();
        assert_eq!(transitions.first(), Some(&Transition::NewGame));
        assert_eq!(transitions.last(), Some(&Transition::EndGame));
        let end_rounds = transitions
            .iter()
            .filter(|t| **t == Transition::EndRound)
            .count();
        assert_eq!(end_rounds, outcome.rounds);
    }

    #[test]
    fn all_pass_rounds_rotate_the_dealer() {
        let mut orchestrator = Orchestrator::new(GameConfig::default(), 3);
        seat_all(&mut orchestrator, None);
        let log = EventLog::new();
        orchestrator.subscribe(Box::new(log.clone()));

        for expected_dealer in [PlayerPosition::East, PlayerPosition::South] {
            let (score, void) = orchestrator.play_round().unwrap();
            assert!(void);
            assert_eq!(score.total(), 0);
            assert_eq!(orchestrator.state().dealer(), expected_dealer);
        }

        let round_events: Vec<Transition> = log.transitions();
        let first_round = &round_events[..round_events
            .iter()
            .position(|t| *t == Transition::EndRound)
            .unwrap()
            + 1];
        assert_eq!(
            first_round,
            &[
                Transition::NewRound,
                Transition::NewBidding,
                Transition::NewBiddingStep,
                Transition::NewBiddingStep,
                Transition::NewBiddingStep,
                Transition::NewBiddingStep,
                Transition::EndBidding,
                Transition::EndRound,
            ]
        );
    }

    #[test]
    fn illegal_card_aborts_the_game() {
        let mut orchestrator = Orchestrator::new(GameConfig::default(), 11);
        orchestrator.register(PlayerPosition::North, Box::new(Cheater));
        for seat in [PlayerPosition::East, PlayerPosition::South, PlayerPosition::West] {
            orchestrator.register(seat, Box::new(FirstLegal { opens: false }));
        }
        let err = orchestrator.play_round().unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalCard {
                seat: PlayerPosition::North,
                ..
            }
        ));
        let round = orchestrator.state().current_round().unwrap();
        assert!(round.current_trick().unwrap().plays().is_empty());
    }
}
