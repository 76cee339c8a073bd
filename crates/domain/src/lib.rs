//! Domain model for the alien invasion simulation.
//!
//! Pure and synchronous: no I/O, no logging and no randomness source of its
//! own. Randomness is injected as a `FnOnce(usize) -> usize` roll wherever a
//! choice has to be made.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{AlienSnapshot, CityRemoval, Placement, World, WorldSnapshot};
pub use entities::{Alien, City};
pub use error::DomainError;
pub use ids::AlienId;
pub use value_objects::{AlienName, CityName, Direction, NeighbourSpec, SimulationStage};
