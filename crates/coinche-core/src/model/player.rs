use core::fmt;
use core::ops::{Add, Sub};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Seat `steps` places further along the rotation.
    pub const fn advance(self, steps: usize) -> PlayerPosition {
        Self::LOOP[(self.index() + steps) % 4]
    }

    pub const fn next(self) -> PlayerPosition {
        self.advance(1)
    }

    pub const fn previous(self) -> PlayerPosition {
        self.advance(3)
    }

    pub const fn partner(self) -> PlayerPosition {
        self.advance(2)
    }

    pub const fn team(self) -> Team {
        match self {
            PlayerPosition::North | PlayerPosition::South => Team::NorthSouth,
            PlayerPosition::East | PlayerPosition::West => Team::EastWest,
        }
    }

    /// Number of seats from `origin` to `self` going clockwise.
    pub const fn offset_from(self, origin: PlayerPosition) -> usize {
        (self.index() + 4 - origin.index()) % 4
    }
}

impl Add<usize> for PlayerPosition {
    type Output = PlayerPosition;

    fn add(self, steps: usize) -> PlayerPosition {
        self.advance(steps)
    }
}

impl Sub<usize> for PlayerPosition {
    type Output = PlayerPosition;

    fn sub(self, steps: usize) -> PlayerPosition {
        self.advance(4 - steps % 4)
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

/// The two fixed partnerships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    NorthSouth,
    EastWest,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn opponent(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::NorthSouth => f.write_str("North/South"),
            Team::EastWest => f.write_str("East/West"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Team};

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(PlayerPosition::North.previous(), PlayerPosition::West);
    }

    #[test]
    fn partner_is_opposite_seat() {
        assert_eq!(PlayerPosition::North.partner(), PlayerPosition::South);
        assert_eq!(PlayerPosition::West.partner(), PlayerPosition::East);
    }

    #[test]
    fn cyclic_arithmetic_matches_rotation() {
        assert_eq!(PlayerPosition::East + 3, PlayerPosition::North);
        assert_eq!(PlayerPosition::East - 2, PlayerPosition::West);
        assert_eq!(PlayerPosition::North - 1, PlayerPosition::West);
        assert_eq!(PlayerPosition::South + 4, PlayerPosition::South);
        assert_eq!(PlayerPosition::West.offset_from(PlayerPosition::East), 2);
    }

    #[test]
    fn teams_pair_opposite_seats() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.team(), seat.partner().team());
            assert_eq!(seat.team().opponent(), seat.next().team());
        }
        assert_eq!(PlayerPosition::North.team(), Team::NorthSouth);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
