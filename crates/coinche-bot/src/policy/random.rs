use coinche_core::game::agent::Agent;
use coinche_core::model::bid::{Bid, BiddingEntry, BiddingStep};
use coinche_core::model::card::Card;
use coinche_core::model::player::PlayerPosition;
use coinche_core::model::suit::{Suit, Trump};
use coinche_core::rules::bidding;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Opens now and then at 80 in a random trump, otherwise passes, and plays
/// a uniformly random legal card.
pub struct RandomAgent {
    rng: StdRng,
    open_probability: f64,
}

impl RandomAgent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            open_probability: 0.3,
        }
    }

    pub fn with_open_probability(mut self, probability: f64) -> Self {
        self.open_probability = probability.clamp(0.0, 1.0);
        self
    }
}

impl Agent for RandomAgent {
    fn propose_bid(&mut self, seat: PlayerPosition, history: &[BiddingEntry]) -> BiddingStep {
        if bidding::standing_bid(history).is_some() || !self.rng.gen_bool(self.open_probability) {
            return BiddingStep::Pass;
        }
        let trump = match self.rng.gen_range(0..5) {
            4 => Trump::NoTrump,
            index => Suit::from_index(index).map(Trump::Suit).unwrap_or(Trump::NoTrump),
        };
        BiddingStep::Bid(Bid::contract(seat, trump, 80))
    }

    fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
        // The orchestrator never asks with an empty legal set.
        match legal.choose(&mut self.rng) {
            Some(card) => *card,
            None => legal[0],
        }
    }
}
