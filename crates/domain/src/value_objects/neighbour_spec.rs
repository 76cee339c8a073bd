//! `direction=Name` entries from a map description.

use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::{CityName, Direction};

/// One outgoing link of a city as written in a map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourSpec {
    pub direction: Direction,
    pub neighbour: CityName,
}

impl NeighbourSpec {
    pub fn new(direction: Direction, neighbour: CityName) -> Self {
        Self {
            direction,
            neighbour,
        }
    }
}

impl FromStr for NeighbourSpec {
    type Err = DomainError;

    /// Parse `"<direction>=<neighbourName>"`.
    ///
    /// # Errors
    ///
    /// - `DomainError::Parse` when the `=` separator is missing
    /// - `DomainError::InvalidDirection` for an unknown direction token
    /// - `DomainError::Validation` for an empty neighbour name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, neighbour) = s
            .split_once('=')
            .ok_or_else(|| DomainError::parse(format!("missing '=' in neighbour spec {:?}", s)))?;
        let direction: Direction = direction.parse()?;
        let neighbour = CityName::new(neighbour)?;
        Ok(Self::new(direction, neighbour))
    }
}

impl fmt::Display for NeighbourSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction.token() {
            Some(token) => write!(f, "{}={}", token, self.neighbour),
            None => write!(f, "{}", self.neighbour),
        }
    }
}
