//! World aggregate - the city graph and the alien population
//!
//! # Indices
//!
//! The world is the single owner of every city and every live alien:
//! - `cities`: name -> city (present = still on the map)
//! - `aliens`: id -> alien (present = alive)
//! - `free_aliens`: live aliens whose city has at least one neighbour
//! - `occupants`: city name -> the one alien standing there
//! - `connections`: city name -> neighbour names, kept symmetric
//!
//! # Invariants
//!
//! - `occupants` is injective and never keyed by a destroyed city
//! - every occupant id is alive; an alive id is free iff its city has neighbours
//! - `b in connections[a]` iff `a in connections[b]`
//! - city links are bidirectional: `a.neighbour(d) == b` iff `b.neighbour(d.opposite()) == a`
//!
//! All indices are ordered, so iteration (and therefore a seeded run) is
//! deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::entities::{Alien, City};
use crate::error::DomainError;
use crate::ids::AlienId;
use crate::value_objects::{CityName, Direction, NeighbourSpec, SimulationStage};

/// Outcome of [`World::place_alien`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The alien now occupies the destination city.
    Settled,
    /// The destination was occupied: both aliens died and the city was destroyed.
    Destroyed {
        city: CityName,
        defender: AlienId,
        /// Aliens left in a neighbourless city by the destruction.
        newly_trapped: Vec<AlienId>,
    },
}

impl Placement {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled)
    }
}

/// What [`World::remove_city`] took off the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRemoval {
    pub city: City,
    /// Alien that was standing in the removed city, if any.
    pub occupant: Option<AlienId>,
    /// Occupants of former neighbours that now have no way out.
    pub newly_trapped: Vec<AlienId>,
}

/// Serializable view of the world for debug logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSnapshot {
    pub cities: Vec<String>,
    pub aliens: Vec<AlienSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlienSnapshot {
    pub id: AlienId,
    pub name: String,
    pub city: Option<String>,
    pub free: bool,
}

#[derive(Debug, Clone, Default)]
pub struct World {
    cities: BTreeMap<CityName, City>,
    aliens: BTreeMap<AlienId, Alien>,
    free_aliens: BTreeSet<AlienId>,
    occupants: BTreeMap<CityName, AlienId>,
    connections: BTreeMap<CityName, BTreeSet<CityName>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Graph Construction
    // =========================================================================

    /// Register a city without any links.
    ///
    /// Registration is idempotent: if a city with the same name exists, the
    /// original is kept untouched and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidCity` if the city already carries neighbour
    /// links; links must be made through [`World::link`] so both directions
    /// and the connection index stay in sync.
    pub fn add_city(&mut self, city: City) -> Result<bool, DomainError> {
        if self.cities.contains_key(city.name()) {
            return Ok(false);
        }
        if city.has_neighbours() {
            return Err(DomainError::invalid_city(format!(
                "{} must be registered before it is linked",
                city.name()
            )));
        }
        self.connections.entry(city.name().clone()).or_default();
        self.cities.insert(city.name().clone(), city);
        Ok(true)
    }

    fn ensure_city(&mut self, name: &CityName) {
        if !self.cities.contains_key(name) {
            self.connections.entry(name.clone()).or_default();
            self.cities.insert(name.clone(), City::new(name.clone()));
        }
    }

    /// Link two registered cities in both directions.
    ///
    /// `from` gets `to` as its neighbour in `direction`, and `to` gets `from`
    /// in `direction.opposite()`. A link that overwrites an older one detaches
    /// the stale edge from both ends.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidDirection` for `Direction::Invalid`
    /// - `DomainError::InvalidCity` for an empty name or a self-link
    /// - `DomainError::CityNotFound` if either city is not registered
    pub fn link(&mut self, from: &str, direction: Direction, to: &str) -> Result<(), DomainError> {
        if !direction.is_valid() {
            return Err(DomainError::invalid_direction(format!(
                "cannot link {} to {} towards {}",
                from, to, direction
            )));
        }
        let from = self.registered(from)?.name().clone();
        let to = self.registered(to)?.name().clone();
        if from == to {
            return Err(DomainError::invalid_city(format!(
                "{} cannot be its own neighbour",
                from
            )));
        }

        let replaced_forward = self.city_mut(&from)?.add_neighbour(direction, to.clone())?;
        let replaced_reverse = self
            .city_mut(&to)?
            .add_neighbour(direction.opposite(), from.clone())?;

        if let Some(stale) = replaced_forward.filter(|stale| *stale != to) {
            self.detach(&from, direction.opposite(), &stale);
        }
        if let Some(stale) = replaced_reverse.filter(|stale| *stale != from) {
            self.detach(&to, direction, &stale);
        }

        self.connect(&from, &to);
        self.refresh_freedom(&from);
        self.refresh_freedom(&to);
        Ok(())
    }

    /// Build the graph from `name -> ["direction=Other", ...]` map data.
    ///
    /// Every spec is parsed before anything is mutated, so a malformed map
    /// leaves the world untouched. Both directions of every edge are written
    /// explicitly, which makes the result independent of iteration order for
    /// any consistent map.
    pub fn initialize_from_map<I, K, V, S>(&mut self, map: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (name, specs) in map {
            let name = CityName::new(name.as_ref())?;
            let specs = specs
                .into_iter()
                .map(|spec| spec.as_ref().parse::<NeighbourSpec>())
                .collect::<Result<Vec<_>, _>>()?;
            if let Some(spec) = specs.iter().find(|spec| spec.neighbour == name) {
                return Err(DomainError::invalid_city(format!(
                    "{} lists itself as a neighbour ({})",
                    name, spec
                )));
            }
            parsed.push((name, specs));
        }

        for (name, specs) in parsed {
            self.ensure_city(&name);
            for spec in specs {
                self.ensure_city(&spec.neighbour);
                self.link(name.as_str(), spec.direction, spec.neighbour.as_str())?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Destruction
    // =========================================================================

    /// Take a city off the map, severing every edge that touched it.
    ///
    /// Former neighbours that are left without any link have their occupant
    /// moved out of the free set; the occupant stays alive. An alien standing
    /// in the removed city loses its occupancy and its freedom.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidCity` for an empty name
    /// - `DomainError::CityNotFound` if the city is not registered
    pub fn remove_city(&mut self, name: &str) -> Result<CityRemoval, DomainError> {
        let name = self.registered(name)?.name().clone();

        let neighbours = self.connections.remove(&name).unwrap_or_default();
        let mut newly_trapped = Vec::new();
        for neighbour in &neighbours {
            if let Some(links) = self.connections.get_mut(neighbour) {
                links.remove(&name);
            }
            if let Some(city) = self.cities.get_mut(neighbour) {
                city.remove_links_to(name.as_str());
            }
            if let Some(id) = self.refresh_freedom(neighbour) {
                newly_trapped.push(id);
            }
        }

        let city = self
            .cities
            .remove(&name)
            .ok_or_else(|| DomainError::city_not_found(name.as_str()))?;
        let occupant = self.occupants.remove(&name);
        if let Some(id) = occupant {
            self.free_aliens.remove(&id);
        }

        Ok(CityRemoval {
            city,
            occupant,
            newly_trapped,
        })
    }

    /// Remove an alien from the population. Returns whether it was alive.
    ///
    /// Killing an already-dead alien is a no-op.
    pub fn kill_alien(&mut self, id: AlienId) -> bool {
        self.free_aliens.remove(&id);
        let Some(alien) = self.aliens.remove(&id) else {
            return false;
        };
        if let Some(city) = alien.location() {
            if self.occupants.get(city) == Some(&id) {
                self.occupants.remove(city);
            }
        }
        true
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Put `alien` into `destination`, resolving a collision if it is occupied.
    ///
    /// Outside [`SimulationStage::SpawningAliens`] the alien must be alive and
    /// placed; its previous city is vacated first. If another alien already
    /// stands in `destination`, both die and the city is destroyed; there is
    /// no winner.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidCity` for an empty destination name
    /// - `DomainError::CityNotFound` if the destination is not registered
    /// - `DomainError::InvalidAlien` if a moving alien is dead or unplaced,
    ///   or a spawning alien is already alive
    pub fn place_alien(
        &mut self,
        mut alien: Alien,
        destination: &str,
        stage: SimulationStage,
    ) -> Result<Placement, DomainError> {
        let destination = self.registered(destination)?.name().clone();
        let id = alien.id();

        if stage == SimulationStage::SpawningAliens {
            if self.aliens.contains_key(&id) {
                return Err(DomainError::invalid_alien(format!(
                    "alien {} has already been spawned",
                    id
                )));
            }
        } else {
            let previous = self
                .aliens
                .get(&id)
                .ok_or_else(|| DomainError::invalid_alien(format!("alien {} is not alive", id)))?
                .location()
                .cloned()
                .ok_or_else(|| {
                    DomainError::invalid_alien(format!("alien {} has not been placed", id))
                })?;
            if self.occupants.get(&previous) == Some(&id) {
                self.occupants.remove(&previous);
            }
        }

        if let Some(defender) = self
            .occupants
            .get(&destination)
            .copied()
            .filter(|occupant| *occupant != id)
        {
            self.kill_alien(defender);
            self.kill_alien(id);
            let removal = self.remove_city(destination.as_str())?;
            return Ok(Placement::Destroyed {
                city: destination,
                defender,
                newly_trapped: removal.newly_trapped,
            });
        }

        let city = self
            .cities
            .get(&destination)
            .ok_or_else(|| DomainError::city_not_found(destination.as_str()))?;
        alien.move_to(city);
        let free = city.has_neighbours();

        self.occupants.insert(destination, id);
        self.aliens.insert(id, alien);
        if free {
            self.free_aliens.insert(id);
        } else {
            self.free_aliens.remove(&id);
        }
        Ok(Placement::Settled)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn city(&self, name: &str) -> Option<&City> {
        self.cities.get(name)
    }

    /// Every city still on the map, in name order.
    pub fn all_cities(&self) -> Vec<&City> {
        self.cities.values().collect()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn alien(&self, id: AlienId) -> Option<&Alien> {
        self.aliens.get(&id)
    }

    /// Live aliens, in id order.
    pub fn aliens(&self) -> impl Iterator<Item = &Alien> + '_ {
        self.aliens.values()
    }

    pub fn alien_count(&self) -> usize {
        self.aliens.len()
    }

    /// Snapshot of the aliens that can still move, in id order.
    pub fn free_aliens(&self) -> Vec<Alien> {
        self.free_aliens
            .iter()
            .filter_map(|id| self.aliens.get(id))
            .cloned()
            .collect()
    }

    pub fn free_alien_count(&self) -> usize {
        self.free_aliens.len()
    }

    pub fn is_alive(&self, id: AlienId) -> bool {
        self.aliens.contains_key(&id)
    }

    pub fn is_free(&self, id: AlienId) -> bool {
        self.free_aliens.contains(&id)
    }

    pub fn all_aliens_dead(&self) -> bool {
        self.aliens.is_empty()
    }

    /// True when no alien can move. Vacuously true with no aliens at all;
    /// check [`World::all_aliens_dead`] first to tell the two apart.
    pub fn all_aliens_trapped(&self) -> bool {
        self.free_aliens.is_empty()
    }

    /// The alien standing in `city`, if any.
    pub fn occupant(&self, city: &str) -> Option<AlienId> {
        self.occupants.get(city).copied()
    }

    pub fn connections_of(&self, city: &str) -> Option<&BTreeSet<CityName>> {
        self.connections.get(city)
    }

    /// The surviving map in map file format, one line per city.
    pub fn map_lines(&self) -> Vec<String> {
        self.cities.values().map(City::map_line).collect()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            cities: self.map_lines(),
            aliens: self
                .aliens
                .values()
                .map(|alien| AlienSnapshot {
                    id: alien.id(),
                    name: alien.name().to_string(),
                    city: alien.location().map(ToString::to_string),
                    free: self.free_aliens.contains(&alien.id()),
                })
                .collect(),
        }
    }

    /// Check every cross-index invariant, reporting the first violation.
    pub fn verify_invariants(&self) -> Result<(), DomainError> {
        let violation = |msg: String| Err(DomainError::validation(msg));

        let mut seen = BTreeSet::new();
        for (city, id) in &self.occupants {
            if !self.cities.contains_key(city) {
                return violation(format!("occupant entry for destroyed city {}", city));
            }
            if !seen.insert(*id) {
                return violation(format!("alien {} occupies more than one city", id));
            }
            if !self.aliens.contains_key(id) {
                return violation(format!("dead alien {} still occupies {}", id, city));
            }
        }

        for id in &self.free_aliens {
            if !self.aliens.contains_key(id) {
                return violation(format!("dead alien {} is marked free", id));
            }
        }
        for (id, alien) in &self.aliens {
            let has_way_out = alien
                .location()
                .filter(|city| self.occupants.get(*city) == Some(id))
                .and_then(|city| self.cities.get(city))
                .is_some_and(City::has_neighbours);
            if has_way_out != self.free_aliens.contains(id) {
                return violation(format!("alien {} freedom does not match its city", id));
            }
        }

        for (name, city) in &self.cities {
            for (direction, neighbour) in city.neighbours() {
                let back = self
                    .cities
                    .get(neighbour)
                    .and_then(|other| other.neighbour(direction.opposite()));
                if back != Some(name) {
                    return violation(format!(
                        "{} links {} to {} without a reverse link",
                        name, direction, neighbour
                    ));
                }
            }
            let linked: BTreeSet<&CityName> = city.neighbours().map(|(_, n)| n).collect();
            let recorded: BTreeSet<&CityName> = self
                .connections
                .get(name)
                .map(|links| links.iter().collect())
                .unwrap_or_default();
            if linked != recorded {
                return violation(format!("connections of {} disagree with its links", name));
            }
        }
        for (name, links) in &self.connections {
            for other in links {
                if !self.connections.get(other).is_some_and(|back| back.contains(name)) {
                    return violation(format!("connection {} -> {} is not symmetric", name, other));
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Look up a city the way `CityName` normalises names (trimmed).
    fn registered(&self, name: &str) -> Result<&City, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_city("city name is empty"));
        }
        self.cities
            .get(name)
            .ok_or_else(|| DomainError::city_not_found(name))
    }

    fn city_mut(&mut self, name: &CityName) -> Result<&mut City, DomainError> {
        self.cities
            .get_mut(name)
            .ok_or_else(|| DomainError::city_not_found(name.as_str()))
    }

    fn connect(&mut self, a: &CityName, b: &CityName) {
        self.connections.entry(a.clone()).or_default().insert(b.clone());
        self.connections.entry(b.clone()).or_default().insert(a.clone());
    }

    /// Drop the stale edge between `owner` and `stale` after `owner`'s slot
    /// was overwritten. `back` is the direction `stale` used to reach `owner`.
    fn detach(&mut self, owner: &CityName, back: Direction, stale: &CityName) {
        if let Some(city) = self.cities.get_mut(stale) {
            if city.neighbour(back) == Some(owner) {
                city.remove_neighbour(back);
            }
        }
        let still_linked = self.cities.get(owner).is_some_and(|c| c.links_to(stale.as_str()))
            || self.cities.get(stale).is_some_and(|c| c.links_to(owner.as_str()));
        if !still_linked {
            if let Some(links) = self.connections.get_mut(owner) {
                links.remove(stale);
            }
            if let Some(links) = self.connections.get_mut(stale) {
                links.remove(owner);
            }
        }
        self.refresh_freedom(stale);
    }

    /// Re-derive the free flag of `city`'s occupant. Returns the occupant if
    /// it just lost its freedom.
    fn refresh_freedom(&mut self, city: &CityName) -> Option<AlienId> {
        let id = *self.occupants.get(city)?;
        if !self.aliens.contains_key(&id) {
            return None;
        }
        let has_way_out = self.cities.get(city).is_some_and(City::has_neighbours);
        if has_way_out {
            self.free_aliens.insert(id);
            None
        } else if self.free_aliens.remove(&id) {
            Some(id)
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
