mod bid;
mod params;
mod play;

pub use bid::{BidPlanner, estimate_points};
pub use params::BotParams;
pub use play::PlayPlanner;

use coinche_core::model::card::Card;
use coinche_core::model::hand::Hand;
use coinche_core::model::player::PlayerPosition;
use coinche_core::model::round::RoundState;
use coinche_core::model::suit::{Suit, Trump};
use coinche_core::model::trick::Trick;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotDifficulty {
    /// Passes every auction and plays the first legal card.
    Easy,
    Normal,
}

impl Default for BotDifficulty {
    fn default() -> Self {
        Self::Normal
    }
}

impl BotDifficulty {
    pub fn from_env() -> Self {
        static CACHED: OnceLock<BotDifficulty> = OnceLock::new();
        *CACHED.get_or_init(|| {
            std::env::var("COINCHE_BOT_DIFFICULTY")
                .ok()
                .and_then(|raw| Self::parse(&raw))
                .unwrap_or_default()
        })
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" | "first" => Some(BotDifficulty::Easy),
            "normal" | "default" | "heuristic" => Some(BotDifficulty::Normal),
            _ => None,
        }
    }
}

/// What a planner may look at: the seat it plays for and the round as the
/// table sees it.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub seat: PlayerPosition,
    pub round: &'a RoundState,
    pub difficulty: BotDifficulty,
    pub params: &'a BotParams,
}

impl<'a> BotContext<'a> {
    pub fn new(
        seat: PlayerPosition,
        round: &'a RoundState,
        difficulty: BotDifficulty,
        params: &'a BotParams,
    ) -> Self {
        Self {
            seat,
            round,
            difficulty,
            params,
        }
    }

    /// Cards still held, taking the open trick into account.
    pub fn hand(&self) -> &'a Hand {
        match self.round.current_trick() {
            Some(trick) => trick.hand(self.seat),
            None => self.round.hand(self.seat),
        }
    }

    pub fn trump(&self) -> Option<Trump> {
        self.round.trump()
    }

    pub fn trick(&self) -> Option<&'a Trick> {
        self.round.current_trick().filter(|trick| !trick.is_complete())
    }

    /// Our side holds the contract.
    pub fn is_attacking(&self) -> bool {
        self.round
            .contract()
            .is_some_and(|bid| bid.position.team() == self.seat.team())
    }

    /// Trumps already seen in earlier tricks of this round.
    pub fn trumps_played(&self) -> usize {
        let Some(trump) = self.trump() else {
            return 0;
        };
        self.round
            .tricks()
            .iter()
            .flat_map(|trick| trick.cards())
            .filter(|card| card.is_trump(trump))
            .count()
    }
}

pub(crate) fn count_cards_in_suit(hand: &Hand, suit: Suit) -> usize {
    hand.iter().filter(|card| card.suit == suit).count()
}

pub(crate) fn card_sort_key(card: Card) -> (u8, u8) {
    (card.suit.index() as u8, card.rank.plain_strength())
}
