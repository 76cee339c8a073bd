//! Command-line and environment configuration.
//!
//! Every flag can also be set through an `INVASION_*` environment variable,
//! which in turn may come from a `.env` file.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_ALIEN_COUNT: u32 = 5;
pub const DEFAULT_MAX_ITERATIONS: u64 = 10_000;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "invasion",
    version,
    about = "Simulate an alien invasion of a made-up world"
)]
pub struct Cli {
    /// Number of aliens to spawn.
    #[arg(
        short = 'N',
        long,
        alias = "alienCount",
        env = "INVASION_ALIEN_COUNT",
        default_value_t = DEFAULT_ALIEN_COUNT
    )]
    pub alien_count: u32,

    /// Map file to load.
    #[arg(
        short = 'm',
        long,
        alias = "mapFileName",
        env = "INVASION_MAP",
        default_value = "map.txt"
    )]
    pub map: PathBuf,

    /// Maximum number of rounds before the simulation stops.
    #[arg(
        short = 'i',
        long = "iter",
        alias = "iterations",
        env = "INVASION_MAX_ITERATIONS",
        default_value_t = DEFAULT_MAX_ITERATIONS
    )]
    pub max_iterations: u64,

    /// Seed for a reproducible run.
    #[arg(long, env = "INVASION_SEED")]
    pub seed: Option<u64>,

    /// Also write a debug-level log to this file.
    #[arg(long, env = "INVASION_DEBUG_LOG")]
    pub debug_log: Option<PathBuf>,
}

/// Settings the simulation driver needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    pub alien_count: u32,
    pub max_iterations: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alien_count: DEFAULT_ALIEN_COUNT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl From<&Cli> for SimulationConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            alien_count: cli.alien_count,
            max_iterations: cli.max_iterations,
        }
    }
}
