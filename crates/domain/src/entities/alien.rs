//! Alien entity - a mobile agent roaming the city graph
//!
//! The alien's `location` is a cache. The world's occupant index is
//! authoritative and updates this field in lock-step through
//! [`Alien::move_to`].

use std::fmt;

use serde::Serialize;

use crate::aggregates::World;
use crate::entities::City;
use crate::error::DomainError;
use crate::ids::AlienId;
use crate::value_objects::{AlienName, CityName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alien {
    id: AlienId,
    name: AlienName,
    location: Option<CityName>,
}

impl Alien {
    /// Create an alien that has not been placed anywhere yet.
    pub fn new(id: AlienId, name: AlienName) -> Self {
        Self {
            id,
            name,
            location: None,
        }
    }

    #[inline]
    pub fn id(&self) -> AlienId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &AlienName {
        &self.name
    }

    /// The city this alien was last moved to, if any.
    #[inline]
    pub fn location(&self) -> Option<&CityName> {
        self.location.as_ref()
    }

    /// Update the cached location. Index bookkeeping is the world's job.
    pub fn move_to(&mut self, city: &City) {
        self.location = Some(city.name().clone());
    }

    /// Pick a uniformly random neighbour of the alien's current city.
    ///
    /// `roll(n)` must return an index drawn uniformly from `0..n`; `n` is the
    /// number of directions that currently lead somewhere (1 to 4).
    ///
    /// # Returns
    /// * `Ok(Some(city))` - the neighbour reached in the chosen direction
    /// * `Ok(None)` - the current city is isolated; the alien is trapped
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidAlien` if the alien has never been placed
    /// - `DomainError::CityNotFound` if its city is no longer on the map
    /// - `DomainError::Validation` if `roll` returns an out-of-range index
    pub fn pick_random_neighbour<R>(
        &self,
        world: &World,
        roll: R,
    ) -> Result<Option<CityName>, DomainError>
    where
        R: FnOnce(usize) -> usize,
    {
        let location = self.location.as_ref().ok_or_else(|| {
            DomainError::invalid_alien(format!("alien {} has not been placed", self.id))
        })?;
        let city = world
            .city(location.as_str())
            .ok_or_else(|| DomainError::city_not_found(location.as_str()))?;

        let directions = city.available_directions();
        if directions.is_empty() {
            return Ok(None);
        }

        let index = roll(directions.len());
        let direction = directions.get(index).ok_or_else(|| {
            DomainError::validation(format!(
                "random index {} out of range for {} directions",
                index,
                directions.len()
            ))
        })?;
        Ok(city.neighbour(*direction).cloned())
    }
}

impl fmt::Display for Alien {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(city) => write!(f, "Alien {} ({}) in {}", self.id, self.name, city),
            None => write!(f, "Alien {} ({}) not yet placed", self.id, self.name),
        }
    }
}
