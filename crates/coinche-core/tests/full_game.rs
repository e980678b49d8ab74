use std::sync::mpsc;
use std::thread;

use coinche_core::game::agent::Agent;
use coinche_core::game::config::GameConfig;
use coinche_core::game::events::{EventLog, GameEvent, Transition};
use coinche_core::game::orchestrator::Orchestrator;
use coinche_core::game::serialization::GameSnapshot;
use coinche_core::model::bid::{Bid, BidKind, BiddingEntry, BiddingStep, CoincheStatus};
use coinche_core::model::card::Card;
use coinche_core::model::player::PlayerPosition;
use coinche_core::model::suit::{Suit, Trump};
use coinche_core::rules::bidding::{self, BiddingRules};
use coinche_core::{GameError, RuleError};

/// Opens at 80 in its favourite suit when nobody has bid, coinches an
/// opposing contract once, and plays the last legal card.
struct TableAgent {
    favourite: Suit,
    coinches: bool,
    events_seen: usize,
}

impl TableAgent {
    fn new(favourite: Suit, coinches: bool) -> Self {
        Self {
            favourite,
            coinches,
            events_seen: 0,
        }
    }
}

impl Agent for TableAgent {
    fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
        match bidding::standing_bid(history) {
            None => BiddingStep::Bid(Bid::contract(seat, Trump::Suit(self.favourite), 80)),
            Some(standing)
                if self.coinches
                    && standing.position.team() != seat.team()
                    && standing.coinche == CoincheStatus::None =>
            {
                BiddingStep::Bid(standing.with_coinche(CoincheStatus::Coinche))
            }
            Some(_) => BiddingStep::Pass,
        }
    }

    fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
        legal[legal.len() - 1]
    }

    fn on_state_changed(&mut self, _event: &GameEvent) {
        self.events_seen += 1;
    }
}

fn seat_table(orchestrator: &mut Orchestrator, coinches: bool) {
    for (seat, suit) in PlayerPosition::LOOP.into_iter().zip(Suit::ALL) {
        orchestrator.register(seat, Box::new(TableAgent::new(suit, coinches)));
    }
}

#[test]
fn full_game_emits_a_consistent_event_stream() {
    let mut orchestrator = Orchestrator::new(GameConfig::default(), 2024);
    seat_table(&mut orchestrator, false);
    let log = EventLog::new();
    orchestrator.subscribe(Box::new(log.clone()));

    let outcome = orchestrator.run().expect("game completes");
    assert!(outcome.winner.is_some());
    assert!(outcome.score.north_south >= 1001 || outcome.score.east_west >= 1001);
    assert_eq!(outcome.void_rounds, 0);

    let events = log.events();
    let bid_prompts = events.iter().filter(|e| e.should_bid()).count();
    let steps = events
        .iter()
        .filter(|e| e.transition == Transition::NewBiddingStep)
        .count();
    // Every step but the closing one of each round leaves a bid pending,
    // plus the opening prompt of each auction.
    assert_eq!(bid_prompts, steps);

    let card_prompts = events.iter().filter(|e| e.should_play()).count();
    let tricks = events
        .iter()
        .filter(|e| e.transition == Transition::EndTrick)
        .count();
    assert_eq!(tricks, outcome.rounds * 8);
    assert_eq!(card_prompts, tricks * 4);

    for event in events.iter().filter(|e| e.transition == Transition::EndRound) {
        let round = event.game.current_round().expect("round present");
        assert_eq!(round.points().total(), 162);
    }
}

#[test]
fn coinched_contracts_are_scored_with_the_multiplier() {
    let config = GameConfig::default().with_rules(BiddingRules::strict());
    let mut orchestrator = Orchestrator::new(config, 99);
    seat_table(&mut orchestrator, true);

    let (score, void) = orchestrator.play_round().expect("round completes");
    assert!(!void);
    let round = orchestrator.state().current_round().expect("round");
    let contract = round.contract().expect("contract");
    assert_eq!(contract.coinche, CoincheStatus::Coinche);
    assert_eq!(contract.kind, BidKind::Contract(80));
    // Either side takes 160 from the doubled 80, belote on top.
    let belote = if round.belote().is_some() { 20 } else { 0 };
    assert_eq!(score.total(), 160 + belote);
}

#[test]
fn events_cross_threads_through_a_channel() {
    let (tx, rx) = mpsc::channel::<GameEvent>();
    let reader = thread::spawn(move || {
        rx.iter()
            .map(|event| GameSnapshot::to_json(&event.game).expect("snapshot"))
            .count()
    });

    let config = GameConfig::default().with_winning_score(200);
    let mut orchestrator = Orchestrator::new(config, 5);
    seat_table(&mut orchestrator, false);
    let log = EventLog::new();
    orchestrator.subscribe(Box::new(tx));
    orchestrator.subscribe(Box::new(log.clone()));
    orchestrator.run().expect("game completes");
    drop(orchestrator);

    let received = reader.join().expect("reader thread");
    assert_eq!(received, log.len());
}

#[test]
fn finished_game_cannot_be_rerun() {
    let mut orchestrator = Orchestrator::new(GameConfig::default().with_winning_score(1), 8);
    seat_table(&mut orchestrator, false);
    orchestrator.run().expect("game completes");
    assert_eq!(orchestrator.run(), Err(GameError::GameOver));
}

#[test]
fn strict_rules_surface_bidding_errors() {
    struct Lowballer;

    impl Agent for Lowballer {
        fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
            let points = if history.is_empty() { 100 } else { 80 };
            BiddingStep::Bid(Bid::contract(seat, Trump::NoTrump, points))
        }

        fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
            legal[0]
        }
    }

    let mut orchestrator =
        Orchestrator::new(GameConfig::default().with_rules(BiddingRules::strict()), 4);
    for seat in PlayerPosition::LOOP {
        orchestrator.register(seat, Box::new(Lowballer));
    }
    assert_eq!(
        orchestrator.play_round(),
        Err(GameError::Rule(RuleError::BidTooLow))
    );
}
