//! Compass directions linking neighbouring cities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Direction of a link between two cities.
///
/// `Invalid` is an error marker produced by [`Direction::parse`] for unknown
/// tokens. It is never stored as a link and never deserialized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
    #[default]
    #[serde(skip_deserializing)]
    Invalid,
}

impl Direction {
    /// The four real directions, in link iteration order.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Get the display label for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "North",
            Self::East => "East",
            Self::South => "South",
            Self::West => "West",
            Self::Invalid => "Invalid Direction",
        }
    }

    /// Lowercase token used in map files (`north=Bar`)
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::North => Some("north"),
            Self::East => Some("east"),
            Self::South => Some("south"),
            Self::West => Some("west"),
            Self::Invalid => None,
        }
    }

    /// Parse a map-file token (case-sensitive, lowercase)
    ///
    /// Unknown tokens yield `Direction::Invalid`.
    pub fn parse(s: &str) -> Self {
        match s {
            "north" => Self::North,
            "east" => Self::East,
            "south" => Self::South,
            "west" => Self::West,
            _ => Self::Invalid,
        }
    }

    /// The direction pointing back along the same edge.
    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Invalid => Self::Invalid,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse(s) {
            Self::Invalid => Err(DomainError::invalid_direction(format!(
                "unknown direction token {:?}",
                s
            ))),
            direction => Ok(direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_labels() {
        assert_eq!(Direction::North.to_string(), "North");
        assert_eq!(Direction::East.to_string(), "East");
        assert_eq!(Direction::South.to_string(), "South");
        assert_eq!(Direction::West.to_string(), "West");
        assert_eq!(Direction::Invalid.to_string(), "Invalid Direction");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Direction::parse("north"), Direction::North);
        assert_eq!(Direction::parse("west"), Direction::West);
        assert_eq!(Direction::parse("North"), Direction::Invalid);
        assert_eq!(Direction::parse("up"), Direction::Invalid);
        assert_eq!(Direction::parse(""), Direction::Invalid);
    }

    #[test]
    fn from_str_rejects_invalid() {
        assert_eq!("south".parse::<Direction>(), Ok(Direction::South));
        assert!(matches!(
            "SOUTH".parse::<Direction>(),
            Err(DomainError::InvalidDirection(_))
        ));
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::Invalid.opposite(), Direction::Invalid);
    }

    #[test]
    fn deserialize_accepts_only_real_directions() {
        let east: Direction = serde_json::from_str("\"east\"").unwrap();
        assert_eq!(east, Direction::East);
        assert!(serde_json::from_str::<Direction>("\"up\"").is_err());
        assert!(serde_json::from_str::<Direction>("\"invalid\"").is_err());
    }

    #[test]
    fn token_roundtrips_through_parse() {
        for direction in Direction::ALL {
            let token = direction.token().unwrap();
            assert_eq!(Direction::parse(token), direction);
        }
        assert!(Direction::Invalid.token().is_none());
    }
}
