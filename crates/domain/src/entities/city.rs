//! City entity - a named node in the world graph
//!
//! Neighbours are stored as `CityName` keys into the world's city arena, one
//! slot per compass direction. A city never holds a reference to another
//! city object, so deleting a city can never leave a dangling pointer behind.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::DomainError;
use crate::value_objects::{CityName, Direction};

/// A city with up to four neighbours.
///
/// # Invariants
///
/// - `name` is always valid (enforced by `CityName`)
/// - no neighbour slot is ever keyed by `Direction::Invalid`
/// - a city never lists itself as a neighbour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    name: CityName,
    neighbours: BTreeMap<Direction, CityName>,
}

impl City {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Create a city with no neighbours.
    pub fn new(name: CityName) -> Self {
        Self {
            name,
            neighbours: BTreeMap::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &CityName {
        &self.name
    }

    /// Returns the neighbour linked in `direction`, if any.
    pub fn neighbour(&self, direction: Direction) -> Option<&CityName> {
        self.neighbours.get(&direction)
    }

    /// Iterate over `(direction, neighbour)` pairs in North, East, South, West order.
    pub fn neighbours(&self) -> impl Iterator<Item = (Direction, &CityName)> + '_ {
        self.neighbours.iter().map(|(direction, name)| (*direction, name))
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Directions that currently lead somewhere.
    pub fn available_directions(&self) -> Vec<Direction> {
        self.neighbours.keys().copied().collect()
    }

    /// True iff at least one direction slot is occupied.
    pub fn has_neighbours(&self) -> bool {
        !self.neighbours.is_empty()
    }

    /// True if any direction slot points at `name`.
    pub fn links_to(&self, name: &str) -> bool {
        self.neighbours.values().any(|n| n.as_str() == name)
    }

    // =========================================================================
    // Mutation Methods
    // =========================================================================

    /// Set (or overwrite) the neighbour in `direction`.
    ///
    /// Only the forward link is written; callers building a bidirectional
    /// edge must also link the neighbour back, or use `World::link`.
    /// Returns the neighbour previously held in that slot.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidDirection` if `direction` is `Invalid`
    /// - `DomainError::InvalidCity` if `neighbour` is this city
    pub fn add_neighbour(
        &mut self,
        direction: Direction,
        neighbour: CityName,
    ) -> Result<Option<CityName>, DomainError> {
        if !direction.is_valid() {
            return Err(DomainError::invalid_direction(format!(
                "cannot link {} towards {}",
                self.name, direction
            )));
        }
        if neighbour == self.name {
            return Err(DomainError::invalid_city(format!(
                "{} cannot be its own neighbour",
                self.name
            )));
        }
        Ok(self.neighbours.insert(direction, neighbour))
    }

    /// Clear the slot in `direction`, returning what it held.
    pub fn remove_neighbour(&mut self, direction: Direction) -> Option<CityName> {
        self.neighbours.remove(&direction)
    }

    /// Strip every slot pointing at `name`, returning the directions cleared.
    pub fn remove_links_to(&mut self, name: &str) -> Vec<Direction> {
        let stale: Vec<Direction> = self
            .neighbours
            .iter()
            .filter(|(_, neighbour)| neighbour.as_str() == name)
            .map(|(direction, _)| *direction)
            .collect();
        for direction in &stale {
            self.neighbours.remove(direction);
        }
        stale
    }

    /// Render the city as a map file line: `Foo north=Bar west=Baz`.
    pub fn map_line(&self) -> String {
        let mut line = self.name.to_string();
        for (direction, neighbour) in self.neighbours() {
            if let Some(token) = direction.token() {
                line.push(' ');
                line.push_str(token);
                line.push('=');
                line.push_str(neighbour.as_str());
            }
        }
        line
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str) -> City {
        City::new(CityName::new(name).unwrap())
    }

    fn name(name: &str) -> CityName {
        CityName::new(name).unwrap()
    }

    mod constructor {
        use super::*;

        #[test]
        fn new_city_has_no_neighbours() {
            let city = city("Random-City-Name");
            assert_eq!(city.name().as_str(), "Random-City-Name");
            assert_eq!(city.neighbour_count(), 0);
            assert!(!city.has_neighbours());
            assert!(city.available_directions().is_empty());
        }
    }

    mod add_neighbour {
        use super::*;

        #[test]
        fn fills_each_direction() {
            let mut city = city("Center");

            for (count, (direction, neighbour)) in [
                (Direction::North, "North-Neighbour"),
                (Direction::East, "East-Neighbour"),
                (Direction::South, "South-Neighbour"),
                (Direction::West, "West-Neighbour"),
            ]
            .into_iter()
            .enumerate()
            {
                let previous = city.add_neighbour(direction, name(neighbour)).unwrap();
                assert!(previous.is_none());
                assert_eq!(city.neighbour_count(), count + 1);
                assert_eq!(city.neighbour(direction).map(|n| n.as_str()), Some(neighbour));
            }
        }

        #[test]
        fn overwrites_existing_slot() {
            let mut city = city("Foo");
            city.add_neighbour(Direction::North, name("Bar")).unwrap();
            let previous = city.add_neighbour(Direction::North, name("Baz")).unwrap();

            assert_eq!(previous, Some(name("Bar")));
            assert_eq!(city.neighbour_count(), 1);
            assert_eq!(city.neighbour(Direction::North), Some(&name("Baz")));
        }

        #[test]
        fn invalid_direction_rejected() {
            let mut city = city("Foo");
            let result = city.add_neighbour(Direction::Invalid, name("Bar"));
            assert!(matches!(result, Err(DomainError::InvalidDirection(_))));
            assert!(!city.has_neighbours());
        }

        #[test]
        fn self_link_rejected() {
            let mut city = city("Foo");
            let result = city.add_neighbour(Direction::East, name("Foo"));
            assert!(matches!(result, Err(DomainError::InvalidCity(_))));
        }

        #[test]
        fn does_not_write_reverse_link() {
            let mut foo = city("Foo");
            let bar = city("Bar");
            foo.add_neighbour(Direction::North, bar.name().clone()).unwrap();
            assert!(!bar.has_neighbours());
        }
    }

    mod removal {
        use super::*;

        #[test]
        fn remove_links_to_clears_every_matching_slot() {
            let mut city = city("Foo");
            city.add_neighbour(Direction::North, name("Bar")).unwrap();
            city.add_neighbour(Direction::South, name("Bar")).unwrap();
            city.add_neighbour(Direction::West, name("Baz")).unwrap();

            let removed = city.remove_links_to("Bar");

            assert_eq!(removed, vec![Direction::North, Direction::South]);
            assert!(!city.links_to("Bar"));
            assert!(city.links_to("Baz"));
            assert!(city.has_neighbours());
        }

        #[test]
        fn remove_neighbour_returns_previous() {
            let mut city = city("Foo");
            city.add_neighbour(Direction::West, name("Baz")).unwrap();
            assert_eq!(city.remove_neighbour(Direction::West), Some(name("Baz")));
            assert_eq!(city.remove_neighbour(Direction::West), None);
            assert!(!city.has_neighbours());
        }
    }

    #[test]
    fn serializes_neighbours_by_lowercase_token() {
        let mut city = city("Foo");
        city.add_neighbour(Direction::North, name("Bar")).unwrap();

        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(json["name"], "Foo");
        assert_eq!(json["neighbours"]["north"], "Bar");
    }

    #[test]
    fn map_line_lists_neighbours_in_compass_order() {
        let mut city = city("Foo");
        city.add_neighbour(Direction::South, name("Qu-ux")).unwrap();
        city.add_neighbour(Direction::North, name("Bar")).unwrap();
        city.add_neighbour(Direction::West, name("Baz")).unwrap();

        assert_eq!(city.map_line(), "Foo north=Bar south=Qu-ux west=Baz");
    }
}
