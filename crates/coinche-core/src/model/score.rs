use crate::model::player::{PlayerPosition, Team};
use core::fmt;
use core::ops::{Add, AddAssign};
use serde::{Deserialize, Serialize};

/// Points for the two partnerships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub north_south: u32,
    pub east_west: u32,
}

impl Score {
    pub const ZERO: Score = Score::new(0, 0);

    pub const fn new(north_south: u32, east_west: u32) -> Self {
        Self {
            north_south,
            east_west,
        }
    }

    /// All `points` credited to `team`.
    pub const fn for_team(team: Team, points: u32) -> Self {
        match team {
            Team::NorthSouth => Self::new(points, 0),
            Team::EastWest => Self::new(0, points),
        }
    }

    pub const fn for_seat(seat: PlayerPosition, points: u32) -> Self {
        Self::for_team(seat.team(), points)
    }

    pub const fn team(&self, team: Team) -> u32 {
        match team {
            Team::NorthSouth => self.north_south,
            Team::EastWest => self.east_west,
        }
    }

    pub const fn total(&self) -> u32 {
        self.north_south + self.east_west
    }

    pub fn leader(&self) -> Option<Team> {
        match self.north_south.cmp(&self.east_west) {
            core::cmp::Ordering::Greater => Some(Team::NorthSouth),
            core::cmp::Ordering::Less => Some(Team::EastWest),
            core::cmp::Ordering::Equal => None,
        }
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score::new(
            self.north_south + other.north_south,
            self.east_west + other.east_west,
        )
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, other: Score) {
        *self = *self + other;
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NS {} / EW {}", self.north_south, self.east_west)
    }
}
