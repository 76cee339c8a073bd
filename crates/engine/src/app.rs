//! Application state and composition.

use std::sync::Arc;

use crate::config::{Cli, SimulationConfig};
use crate::infrastructure::{
    map_file::{load_map, MapFileError},
    names::PetNamer,
    ports::{NamePort, RandomPort},
    random::{SeededRandom, SystemRandom},
};
use crate::simulation::Simulation;

/// Main application state.
///
/// Wires the port adapters into a ready-to-run simulation.
pub struct App {
    pub simulation: Simulation,
}

impl App {
    /// Load the map named by `cli` and compose the adapters around it.
    pub fn from_cli(cli: &Cli) -> Result<Self, MapFileError> {
        let map = load_map(&cli.map)?;
        let random = random_for(cli.seed);
        let namer: Arc<dyn NamePort> = Arc::new(PetNamer::new(random.clone()));

        tracing::info!(
            map = %cli.map.display(),
            aliens = cli.alien_count,
            max_iterations = cli.max_iterations,
            seed = ?cli.seed,
            "Creating simulation"
        );
        let simulation = Simulation::new(SimulationConfig::from(cli), map, random, namer);
        Ok(Self { simulation })
    }
}

/// Seeded RNG when a seed is given, thread RNG otherwise.
pub fn random_for(seed: Option<u64>) -> Arc<dyn RandomPort> {
    match seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(SystemRandom::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use clap::Parser;

    use crate::simulation::Outcome;

    fn map_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Foo north=Bar west=Baz south=Qu-ux").unwrap();
        writeln!(file, "Bar south=Foo west=Bee").unwrap();
        writeln!(file, "Baz east=Foo").unwrap();
        writeln!(file, "Qu-ux north=Foo").unwrap();
        writeln!(file, "Bee east=Bar").unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("invasion").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn seeded_app_runs_end_to_end() {
        let file = map_file();
        let path = file.path().to_string_lossy().to_string();
        let cli = cli(&["-m", path.as_str(), "-N", "3", "-i", "25", "--seed", "8"]);

        let mut app = App::from_cli(&cli).unwrap();
        app.simulation.initialize().unwrap();
        let report = app.simulation.run().unwrap();

        assert!(report.rounds <= 25);
        if report.outcome == Outcome::AllAliensDead {
            assert!(report.survivors.is_empty());
        }
        for alien in &report.survivors {
            assert!(alien.name().as_str().ends_with(&format!("_{}", alien.id())));
        }
        app.simulation.world().verify_invariants().unwrap();
    }

    #[test]
    fn same_seed_gives_same_survivors() {
        let file = map_file();
        let path = file.path().to_string_lossy().to_string();
        let args = ["-m", path.as_str(), "-N", "4", "-i", "40", "--seed", "1234"];

        let mut reports = Vec::new();
        for _ in 0..2 {
            let mut app = App::from_cli(&cli(&args)).unwrap();
            app.simulation.initialize().unwrap();
            reports.push(app.simulation.run().unwrap());
        }
        assert_eq!(reports[0], reports[1]);
    }

    #[test]
    fn missing_map_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt").to_string_lossy().to_string();

        let result = App::from_cli(&cli(&["-m", path.as_str()]));
        assert!(matches!(result, Err(MapFileError::Io { .. })));
    }
}
