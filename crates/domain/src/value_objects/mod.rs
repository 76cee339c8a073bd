//! Value objects: validated names, directions, map specs and simulation stages.

mod direction;
mod names;
mod neighbour_spec;
mod stage;

pub use direction::Direction;
pub use names::{AlienName, CityName};
pub use neighbour_spec::NeighbourSpec;
pub use stage::SimulationStage;
