use core::fmt;
use serde::{Deserialize, Serialize};

/// The eight ranks of the 32-card piquet deck.
///
/// Each rank carries three point values (plain suit, trump suit, no-trump
/// contract) and two strength orders. Declaration order is the plain order
/// of the physical cards, not the trick-taking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub const ORDERED: [Rank; 8] = [
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Points when the card's suit is not trump.
    pub const fn value(self) -> u32 {
        match self {
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Jack => 2,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }

    /// Points when the card's suit is trump.
    pub const fn trump_value(self) -> u32 {
        match self {
            Rank::Seven | Rank::Eight => 0,
            Rank::Queen => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
            Rank::Nine => 14,
            Rank::Jack => 20,
        }
    }

    /// Points under a no-trump contract.
    pub const fn no_trump_value(self) -> u32 {
        match self {
            Rank::Ace => 19,
            other => other.value(),
        }
    }

    /// Strength outside trump: 7 < 8 < 9 < J < Q < K < 10 < A.
    pub const fn plain_strength(self) -> u8 {
        match self {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Nine => 2,
            Rank::Jack => 3,
            Rank::Queen => 4,
            Rank::King => 5,
            Rank::Ten => 6,
            Rank::Ace => 7,
        }
    }

    /// Strength within trump: 7 < 8 < Q < K < 10 < A < 9 < J.
    pub const fn trump_strength(self) -> u8 {
        match self {
            Rank::Seven => 0,
            Rank::Eight => 1,
            Rank::Queen => 2,
            Rank::King => 3,
            Rank::Ten => 4,
            Rank::Ace => 5,
            Rank::Nine => 6,
            Rank::Jack => 7,
        }
    }

    pub const fn is_better_than(self, other: Rank, as_trump: bool) -> bool {
        if as_trump {
            self.trump_strength() > other.trump_strength()
        } else {
            self.plain_strength() > other.plain_strength()
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}
