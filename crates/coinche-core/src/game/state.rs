use crate::error::RuleError;
use crate::game::config::GameConfig;
use crate::game::error::GameError;
use crate::model::bid::BiddingStep;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::{PlayerPosition, Team};
use crate::model::round::{RoundState, TrickSettlement};
use crate::model::score::Score;
use crate::rules::bidding::BiddingRules;
use crate::rules::scoring::{self, DECK_POINTS};
use serde::{Deserialize, Serialize};

/// A whole game: every round dealt so far plus the running team totals.
///
/// Transitions return a new value; a `GameState` handed out in an event is
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    dealer: PlayerPosition,
    rounds: Vec<RoundState>,
    score: Score,
    winning_score: u32,
    rules: BiddingRules,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            dealer: config.first_dealer,
            rounds: Vec::new(),
            score: Score::ZERO,
            winning_score: config.winning_score,
            rules: config.rules,
        }
    }

    /// Seat that opens the bidding of the next round to be dealt.
    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn rounds(&self) -> &[RoundState] {
        &self.rounds
    }

    pub fn round_number(&self) -> usize {
        self.rounds.len()
    }

    pub fn current_round(&self) -> Option<&RoundState> {
        self.rounds.last()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    pub fn rules(&self) -> BiddingRules {
        self.rules
    }

    pub fn is_done(&self) -> bool {
        self.score.north_south >= self.winning_score || self.score.east_west >= self.winning_score
    }

    /// Team ahead once the game is over; `None` while playing or on a tie.
    pub fn winner(&self) -> Option<Team> {
        if self.is_done() {
            self.score.leader()
        } else {
            None
        }
    }

    /// Seat whose bid is awaited, if the current round is in its auction.
    pub fn awaiting_bid_from(&self) -> Option<PlayerPosition> {
        self.current_round()
            .filter(|round| !round.bidding_is_over())
            .map(RoundState::next_speaker)
    }

    /// Seat whose card is awaited, if a trick is open.
    pub fn awaiting_card_from(&self) -> Option<PlayerPosition> {
        self.current_round()
            .and_then(RoundState::current_trick)
            .filter(|trick| !trick.is_complete())
            .map(|trick| trick.current_position())
    }

    /// Deals `deck` into a new round opened by the dealer. The previous
    /// round must have been played out and scored.
    pub fn with_new_round(&self, deck: &Deck) -> Result<Self, GameError> {
        if self.is_done() {
            return Err(GameError::GameOver);
        }
        if self
            .current_round()
            .is_some_and(|round| !round.is_done() || !round.is_scored())
        {
            return Err(RuleError::RoundIncomplete.into());
        }
        let mut next = self.clone();
        next.rounds.push(RoundState::deal(deck, self.dealer));
        Ok(next)
    }

    pub fn apply_bidding_step(&self, step: BiddingStep) -> Result<Self, GameError> {
        let rules = self.rules;
        self.map_round(|round| round.with_bidding_step(step, rules))
    }

    pub fn with_new_trick(&self) -> Result<Self, GameError> {
        self.map_round(RoundState::with_new_trick)
    }

    pub fn legal_cards(&self) -> Result<Vec<Card>, GameError> {
        Ok(self.round()?.legal_cards()?)
    }

    pub fn play_card(&self, card: Card) -> Result<Self, GameError> {
        self.map_round(|round| round.play_card(card))
    }

    pub fn settle_trick(&self) -> Result<(Self, TrickSettlement), GameError> {
        let (round, settlement) = self.round()?.settle_trick()?;
        Ok((self.replace_round(round), settlement))
    }

    /// Scores the finished round, adds it to the totals and passes the deal
    /// to the next seat. Returns the round's score.
    ///
    /// A round is scored once; finishing it again is refused.
    pub fn finish_round(&self) -> Result<(Self, Score), GameError> {
        let round = self.round()?;
        if !round.is_done() {
            return Err(RuleError::RoundIncomplete.into());
        }
        if round.is_scored() {
            return Err(RuleError::RoundAlreadyScored.into());
        }
        if !round.is_void() {
            let actual = round.points().total();
            if actual != DECK_POINTS {
                return Err(GameError::PointTotal {
                    expected: DECK_POINTS,
                    actual,
                });
            }
        }

        let round_score = scoring::round_score(round)?;
        let mut next = self.replace_round(round.mark_scored());
        next.score += round_score;
        next.dealer = self.dealer.next();
        Ok((next, round_score))
    }

    fn round(&self) -> Result<&RoundState, GameError> {
        if self.is_done() {
            return Err(GameError::GameOver);
        }
        self.current_round()
            .ok_or(GameError::Rule(RuleError::BiddingOpen))
    }

    fn map_round<F>(&self, transition: F) -> Result<Self, GameError>
    where
        F: FnOnce(&RoundState) -> Result<RoundState, RuleError>,
    {
        let round = transition(self.round()?)?;
        Ok(self.replace_round(round))
    }

    fn replace_round(&self, round: RoundState) -> Self {
        let mut next = self.clone();
        if let Some(last) = next.rounds.last_mut() {
            *last = round;
        }
        next
    }
}
