//! Alien invasion engine library.
//!
//! Drives the domain model: loads the map, spawns aliens and runs the rounds.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `simulation/` - The stage machine and round loop
//! - `config` - Command-line and environment settings
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod simulation;

pub use app::App;
pub use config::{Cli, SimulationConfig};
pub use simulation::{Outcome, Simulation, SimulationError, SimulationReport};
