//! Simulation driver.
//!
//! Walks the stages `Start -> InitializingWorld -> SpawningAliens ->
//! MovingAliens -> End`, one way only. `initialize` builds the world and
//! spawns the aliens; `run` moves them round by round until a terminal
//! condition holds.

use std::fmt;
use std::sync::Arc;

use invasion_domain::{
    Alien, AlienId, AlienName, CityName, DomainError, Placement, SimulationStage, World,
};

use crate::config::SimulationConfig;
use crate::infrastructure::map_file::MapData;
use crate::infrastructure::ports::{NamePort, RandomPort};

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("No cities left in the world to spawn aliens into")]
    NoCities,
    #[error("Simulation is at stage {actual}, expected {expected}")]
    OutOfOrder {
        expected: SimulationStage,
        actual: SimulationStage,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Why the round loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    IterationLimit,
    AllAliensDead,
    AllAliensTrapped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IterationLimit => "Reached maximum number of iterations",
            Self::AllAliensDead => "All aliens have died",
            Self::AllAliensTrapped => "All aliens are trapped in isolated cities",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    pub outcome: Outcome,
    pub rounds: u64,
    /// Destroyed cities in the order they fell.
    pub destroyed: Vec<CityName>,
    pub survivors: Vec<Alien>,
}

pub struct Simulation {
    config: SimulationConfig,
    map: MapData,
    world: World,
    stage: SimulationStage,
    random: Arc<dyn RandomPort>,
    namer: Arc<dyn NamePort>,
    destroyed: Vec<CityName>,
}

impl Simulation {
    pub fn new(
        config: SimulationConfig,
        map: MapData,
        random: Arc<dyn RandomPort>,
        namer: Arc<dyn NamePort>,
    ) -> Self {
        Self {
            config,
            map,
            world: World::new(),
            stage: SimulationStage::Start,
            random,
            namer,
            destroyed: Vec::new(),
        }
    }

    pub fn stage(&self) -> SimulationStage {
        self.stage
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Build the world from the map and spawn every alien at a random city.
    ///
    /// A spawn into an occupied city is a collision like any other: both
    /// aliens die and the city is destroyed. It is not retried.
    ///
    /// # Errors
    ///
    /// - `SimulationError::OutOfOrder` unless the simulation is at `Start`
    /// - `SimulationError::Domain` for a malformed map
    /// - `SimulationError::NoCities` if no city is left to spawn into
    pub fn initialize(&mut self) -> Result<(), SimulationError> {
        self.expect_stage(SimulationStage::Start)?;

        self.advance();
        self.world.initialize_from_map(&self.map)?;
        tracing::info!(cities = self.world.city_count(), "World initialized");

        self.advance();
        for raw_id in 0..self.config.alien_count {
            self.spawn(AlienId::new(raw_id))?;
            self.log_world_state();
        }
        tracing::info!(
            alive = self.world.alien_count(),
            free = self.world.free_alien_count(),
            "Aliens spawned"
        );
        Ok(())
    }

    fn spawn(&mut self, id: AlienId) -> Result<(), SimulationError> {
        let alien = Alien::new(id, self.alien_name(id)?);

        let cities = self.world.all_cities();
        if cities.is_empty() {
            tracing::error!("No cities left in the world. Exiting simulation.");
            return Err(SimulationError::NoCities);
        }
        let index = self.random.gen_index(cities.len());
        let city = cities
            .get(index)
            .map(|city| city.name().clone())
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "random index {} out of range for {} cities",
                    index,
                    cities.len()
                ))
            })?;

        match self.world.place_alien(alien, city.as_str(), self.stage) {
            Ok(Placement::Settled) => {
                tracing::info!(alien = %id, city = %city, "Alien {} spawned in {}.", id, city);
            }
            Ok(Placement::Destroyed { defender, .. }) => {
                tracing::info!(
                    alien = %id,
                    defender = %defender,
                    city = %city,
                    "Alien {} tried to spawn in {} where an alien already exists. {} was destroyed.",
                    id,
                    city,
                    city
                );
                self.destroyed.push(city);
            }
            Err(err) => {
                tracing::warn!(alien = %id, city = %city, error = %err, "Cannot spawn alien");
            }
        }
        Ok(())
    }

    /// Name from the namer, or `alien_<id>` when the namer hands back
    /// something `AlienName` rejects.
    fn alien_name(&self, id: AlienId) -> Result<AlienName, DomainError> {
        let name = self.namer.name_for(id);
        match AlienName::new(name.as_str()) {
            Ok(name) => Ok(name),
            Err(err) => {
                tracing::warn!(
                    alien = %id,
                    name = ?name,
                    error = %err,
                    "Unusable alien name; using default"
                );
                AlienName::new(format!("alien_{}", id))
            }
        }
    }

    /// Move aliens round by round until a terminal condition holds.
    ///
    /// # Errors
    ///
    /// `SimulationError::OutOfOrder` unless [`Simulation::initialize`] has run.
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        self.expect_stage(SimulationStage::SpawningAliens)?;
        self.advance();

        let mut rounds = 0;
        let outcome = loop {
            if let Some(outcome) = self.termination(rounds) {
                break outcome;
            }
            let moves = self.step_round();
            rounds += 1;
            tracing::debug!(round = rounds, moves, "Round complete");
        };

        self.advance();
        tracing::info!(%outcome, rounds, "{}. Exiting simulation.", outcome);
        self.log_world_state();

        Ok(SimulationReport {
            outcome,
            rounds,
            destroyed: self.destroyed.clone(),
            survivors: self.world.aliens().cloned().collect(),
        })
    }

    /// Terminal checks in priority order: iteration limit, then all dead,
    /// then all trapped.
    fn termination(&self, rounds: u64) -> Option<Outcome> {
        if rounds >= self.config.max_iterations {
            Some(Outcome::IterationLimit)
        } else if self.world.all_aliens_dead() {
            Some(Outcome::AllAliensDead)
        } else if self.world.all_aliens_trapped() {
            Some(Outcome::AllAliensTrapped)
        } else {
            None
        }
    }

    /// Give every alien that was free at the start of the round one move, in
    /// id order. Returns the number of aliens that moved.
    fn step_round(&mut self) -> usize {
        let mut moves = 0;
        for alien in self.world.free_aliens() {
            let id = alien.id();
            if !self.world.is_alive(id) {
                tracing::debug!(alien = %id, "Alien {} died during current iteration.", id);
                continue;
            }
            if !self.world.is_free(id) {
                tracing::debug!(alien = %id, "Alien {} got trapped during current iteration.", id);
                continue;
            }

            let random = &self.random;
            let target = match alien.pick_random_neighbour(&self.world, |n| random.gen_index(n)) {
                Ok(Some(target)) => target,
                Ok(None) => {
                    tracing::debug!(alien = %id, "Alien {} is trapped.", id);
                    continue;
                }
                Err(err) => {
                    tracing::debug!(alien = %id, error = %err, "Cannot pick a neighbour");
                    continue;
                }
            };

            match self.world.place_alien(alien, target.as_str(), self.stage) {
                Ok(Placement::Settled) => {
                    moves += 1;
                    tracing::info!(alien = %id, city = %target, "Alien {} moved to {}.", id, target);
                }
                Ok(Placement::Destroyed {
                    city,
                    defender,
                    newly_trapped,
                }) => {
                    moves += 1;
                    tracing::info!(
                        alien = %id,
                        defender = %defender,
                        city = %city,
                        "{} has been destroyed by alien {} and alien {}!",
                        city,
                        defender,
                        id
                    );
                    for trapped in newly_trapped {
                        tracing::debug!(alien = %trapped, "Alien {} is now trapped.", trapped);
                    }
                    self.destroyed.push(city);
                }
                Err(err) => {
                    tracing::debug!(alien = %id, city = %target, error = %err, "Cannot move alien");
                }
            }
        }
        moves
    }

    fn expect_stage(&self, expected: SimulationStage) -> Result<(), SimulationError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SimulationError::OutOfOrder {
                expected,
                actual: self.stage,
            })
        }
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        tracing::debug!(stage = %self.stage, "Simulation stage changed");
    }

    fn log_world_state(&self) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }
        match serde_json::to_string(&self.world.snapshot()) {
            Ok(state) => tracing::debug!(world = %state, "World state"),
            Err(err) => tracing::warn!(error = %err, "Cannot serialize world state"),
        }
    }
}
