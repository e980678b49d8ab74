use crate::model::rank::Rank;
use crate::model::suit::{Suit, Trump};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn is_trump(self, trump: Trump) -> bool {
        trump.is_trump(self.suit)
    }

    /// Trump-aware point value of the card.
    pub fn points(self, trump: Trump) -> u32 {
        match trump {
            Trump::Suit(suit) if suit == self.suit => self.rank.trump_value(),
            Trump::Suit(_) => self.rank.value(),
            Trump::NoTrump => self.rank.no_trump_value(),
        }
    }

    /// Whether `self` takes `other` when both are in a trick led in `led`.
    ///
    /// A trump beats any non-trump, a card of the led suit beats any
    /// discard, and two cards of the same suit compare by the order that
    /// applies to that suit. Two discards never beat each other.
    pub fn beats(self, other: Card, trump: Trump, led: Suit) -> bool {
        let self_trump = self.is_trump(trump);
        let other_trump = other.is_trump(trump);
        match (self_trump, other_trump) {
            (true, false) => true,
            (false, true) => false,
            (true, true) => self.rank.is_better_than(other.rank, true),
            (false, false) => {
                if self.suit == other.suit {
                    self.rank.is_better_than(other.rank, false)
                } else {
                    self.suit == led
                }
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
