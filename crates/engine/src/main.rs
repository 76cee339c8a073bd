//! Alien invasion - main entry point.

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use invasion_engine::infrastructure::logging::init_logging;
use invasion_engine::{App, Cli};

fn main() -> anyhow::Result<()> {
    load_dotenv();
    let cli = Cli::parse();

    init_logging(cli.debug_log.as_deref()).context("Failed to initialize logging")?;
    tracing::info!("Starting alien invasion");

    let mut app = App::from_cli(&cli).context("Error creating a simulation")?;
    if let Err(err) = app.simulation.initialize() {
        tracing::error!(error = %err, "Simulation setup failed");
        return Err(err).context("Error initializing the simulation");
    }
    let report = app.simulation.run().context("Error running the simulation")?;

    tracing::info!(
        outcome = %report.outcome,
        rounds = report.rounds,
        destroyed = report.destroyed.len(),
        survivors = report.survivors.len(),
        "Simulation finished"
    );

    let mut stdout = std::io::stdout().lock();
    for line in app.simulation.world().map_lines() {
        writeln!(stdout, "{}", line).context("Failed to print the surviving map")?;
    }
    Ok(())
}

/// Load `.env.local` then `.env` from the working directory, if present.
fn load_dotenv() {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
