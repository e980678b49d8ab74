use crate::model::player::PlayerPosition;
use crate::model::suit::Trump;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BidKind {
    /// Take at least this many points.
    Contract(u32),
    /// The bidding team takes every trick.
    Capot,
    /// The bidder alone takes every trick.
    Generale,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CoincheStatus {
    #[default]
    None,
    Coinche,
    Surcoinche,
}

impl CoincheStatus {
    pub const fn multiplier(self) -> u32 {
        match self {
            CoincheStatus::None => 1,
            CoincheStatus::Coinche => 2,
            CoincheStatus::Surcoinche => 4,
        }
    }

    pub const fn raised(self) -> Option<CoincheStatus> {
        match self {
            CoincheStatus::None => Some(CoincheStatus::Coinche),
            CoincheStatus::Coinche => Some(CoincheStatus::Surcoinche),
            CoincheStatus::Surcoinche => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub position: PlayerPosition,
    pub trump: Trump,
    pub kind: BidKind,
    #[serde(default)]
    pub coinche: CoincheStatus,
}

impl Bid {
    pub const fn new(position: PlayerPosition, trump: Trump, kind: BidKind) -> Self {
        Self {
            position,
            trump,
            kind,
            coinche: CoincheStatus::None,
        }
    }

    pub const fn contract(position: PlayerPosition, trump: Trump, points: u32) -> Self {
        Self::new(position, trump, BidKind::Contract(points))
    }

    pub const fn with_coinche(self, coinche: CoincheStatus) -> Self {
        Self { coinche, ..self }
    }

    /// The same bid doubled one level further, if it can still be raised.
    pub fn coinched(self) -> Option<Self> {
        self.coinche.raised().map(|status| self.with_coinche(status))
    }

    /// Whether `other` names the same contract, ignoring coinche status.
    pub fn same_contract(&self, other: &Bid) -> bool {
        self.position == other.position && self.trump == other.trump && self.kind == other.kind
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            BidKind::Contract(points) => write!(f, "{} {}{}", self.position, points, self.trump)?,
            BidKind::Capot => write!(f, "{} capot {}", self.position, self.trump)?,
            BidKind::Generale => write!(f, "{} generale {}", self.position, self.trump)?,
        }
        match self.coinche {
            CoincheStatus::None => Ok(()),
            CoincheStatus::Coinche => f.write_str(" coinched"),
            CoincheStatus::Surcoinche => f.write_str(" surcoinched"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiddingStep {
    Pass,
    Bid(Bid),
}

impl BiddingStep {
    pub const fn is_pass(&self) -> bool {
        matches!(self, BiddingStep::Pass)
    }

    pub fn bid(&self) -> Option<&Bid> {
        match self {
            BiddingStep::Bid(bid) => Some(bid),
            BiddingStep::Pass => None,
        }
    }
}

impl From<Bid> for BiddingStep {
    fn from(bid: Bid) -> Self {
        BiddingStep::Bid(bid)
    }
}

impl fmt::Display for BiddingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiddingStep::Pass => f.write_str("pass"),
            BiddingStep::Bid(bid) => write!(f, "{bid}"),
        }
    }
}

/// One spoken step of the auction: who spoke and what they said.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiddingEntry {
    pub speaker: PlayerPosition,
    pub step: BiddingStep,
}

impl BiddingEntry {
    pub const fn new(speaker: PlayerPosition, step: BiddingStep) -> Self {
        Self { speaker, step }
    }
}
