use crate::error::RuleError;
use crate::model::bid::{Bid, BiddingEntry, BiddingStep};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::rank::Rank;
use crate::model::score::Score;
use crate::model::suit::Trump;
use crate::model::trick::Trick;
use crate::rules::bidding::{self, BiddingRules};
use crate::rules::{play, scoring};
use serde::{Deserialize, Serialize};

/// One deal: the auction followed by up to eight tricks.
///
/// Every transition returns a new `RoundState`; the receiver is left as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    tricks: Vec<Trick>,
    hands: [Hand; 4],
    opener: PlayerPosition,
    leader: PlayerPosition,
    bidding: Vec<BiddingEntry>,
    belote: Option<PlayerPosition>,
    points: Score,
    tricks_scored: usize,
    #[serde(default)]
    scored: bool,
}

/// Result of closing a trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickSettlement {
    pub winner: PlayerPosition,
    pub points: Score,
    pub last_trick: bool,
}

impl RoundState {
    pub fn deal(deck: &Deck, opener: PlayerPosition) -> Self {
        Self::from_hands(deck.deal(), opener)
    }

    pub fn from_hands(hands: [Hand; 4], opener: PlayerPosition) -> Self {
        Self {
            tricks: Vec::new(),
            hands,
            opener,
            leader: opener,
            bidding: Vec::new(),
            belote: None,
            points: Score::ZERO,
            tricks_scored: 0,
            scored: false,
        }
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn current_trick(&self) -> Option<&Trick> {
        self.tricks.last()
    }

    /// Seat that speaks first in the auction.
    pub fn opener(&self) -> PlayerPosition {
        self.opener
    }

    /// Seat that leads the next trick to be opened.
    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn bidding(&self) -> &[BiddingEntry] {
        &self.bidding
    }

    pub fn belote(&self) -> Option<PlayerPosition> {
        self.belote
    }

    /// Running trick-point tally, last-trick bonus included.
    pub fn points(&self) -> Score {
        self.points
    }

    pub fn tricks_scored(&self) -> usize {
        self.tricks_scored
    }

    pub fn next_speaker(&self) -> PlayerPosition {
        bidding::next_speaker(&self.bidding, self.opener)
    }

    pub fn bidding_is_over(&self) -> bool {
        bidding::bidding_is_over(&self.bidding)
    }

    /// Standing contract once any bid was made.
    pub fn contract(&self) -> Option<&Bid> {
        bidding::standing_bid(&self.bidding)
    }

    pub fn trump(&self) -> Option<Trump> {
        self.contract().map(|bid| bid.trump)
    }

    /// Auction closed without a single bid.
    pub fn is_void(&self) -> bool {
        self.bidding_is_over() && bidding::all_passed(&self.bidding)
    }

    pub fn are_empty_handed(&self) -> bool {
        self.hands.iter().all(Hand::is_empty)
    }

    pub fn is_done(&self) -> bool {
        self.is_void() || self.are_empty_handed()
    }

    /// The round's result was already added to the game totals.
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub(crate) fn mark_scored(&self) -> Self {
        Self {
            scored: true,
            ..self.clone()
        }
    }

    /// Round with `step` appended under the seat whose turn it is.
    ///
    /// When the step closes the auction on a suit contract, the seat dealt
    /// both the queen and king of trump is recorded as belote holder.
    pub fn with_bidding_step(
        &self,
        step: BiddingStep,
        rules: BiddingRules,
    ) -> Result<Self, RuleError> {
        let speaker = self.next_speaker();
        bidding::validate_step(&self.bidding, speaker, &step, rules)?;

        let mut next = self.clone();
        next.bidding.push(BiddingEntry::new(speaker, step));
        if next.bidding_is_over() {
            next.belote = next.trump().and_then(|trump| find_belote(&next.hands, trump));
        }
        Ok(next)
    }

    /// Round with a fresh trick led by [`Self::leader`].
    pub fn with_new_trick(&self) -> Result<Self, RuleError> {
        if !self.bidding_is_over() {
            return Err(RuleError::BiddingOpen);
        }
        if self.contract().is_none() {
            return Err(RuleError::NoContract);
        }
        if self.tricks_scored < self.tricks.len() {
            return Err(RuleError::TrickIncomplete);
        }
        if self.are_empty_handed() {
            return Err(RuleError::TrickComplete);
        }

        let mut next = self.clone();
        next.tricks.push(Trick::new(self.leader, self.hands.clone()));
        Ok(next)
    }

    /// Round with `card` played into the current trick by the seat to move.
    pub fn play_card(&self, card: Card) -> Result<Self, RuleError> {
        let trump = self.trump().ok_or(RuleError::NoContract)?;
        let trick = self.open_trick()?;
        let advanced = play::advance_trick(trick, trump, card)?;

        let mut next = self.clone();
        if let Some(last) = next.tricks.last_mut() {
            *last = advanced;
        }
        Ok(next)
    }

    pub fn legal_cards(&self) -> Result<Vec<Card>, RuleError> {
        let trump = self.trump().ok_or(RuleError::NoContract)?;
        play::legal_cards(self.open_trick()?, trump)
    }

    /// Settles the completed current trick: the winner leads next, hands
    /// carry forward and the trick's points join the tally.
    pub fn settle_trick(&self) -> Result<(Self, TrickSettlement), RuleError> {
        let trump = self.trump().ok_or(RuleError::NoContract)?;
        let trick = self.current_trick().ok_or(RuleError::TrickIncomplete)?;
        if !trick.is_complete() {
            return Err(RuleError::TrickIncomplete);
        }
        if self.tricks_scored == self.tricks.len() {
            return Err(RuleError::TrickComplete);
        }

        let winner = play::trick_winner(trick, trump)?;
        let last_trick = trick.hands().iter().all(Hand::is_empty);
        let points = scoring::trick_points(trick, trump, winner, last_trick)?;

        let mut next = self.clone();
        next.hands = trick.hands().clone();
        next.leader = winner;
        next.points += points;
        next.tricks_scored += 1;
        Ok((
            next,
            TrickSettlement {
                winner,
                points,
                last_trick,
            },
        ))
    }

    fn open_trick(&self) -> Result<&Trick, RuleError> {
        match self.current_trick() {
            Some(trick) if !trick.is_complete() => Ok(trick),
            Some(_) => Err(RuleError::TrickComplete),
            None if self.bidding_is_over() => Err(RuleError::TrickComplete),
            None => Err(RuleError::BiddingOpen),
        }
    }
}

/// Seat holding both queen and king of the trump suit.
pub fn find_belote(hands: &[Hand; 4], trump: Trump) -> Option<PlayerPosition> {
    let suit = trump.suit()?;
    let queen = Card::new(Rank::Queen, suit);
    let king = Card::new(Rank::King, suit);
    PlayerPosition::LOOP
        .iter()
        .copied()
        .find(|seat| {
            let hand = &hands[seat.index()];
            hand.contains(queen) && hand.contains(king)
        })
}
