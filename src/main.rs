use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use orrery::{
    config::{self, ScenarioConfig},
    constants::DAY,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use canvas::Canvas;

mod canvas;

/// Runs a star system for a number of ticks and draws the final frame as text.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scenario file. Defaults to the inner solar system.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 365)]
    ticks: usize,

    /// Newest trajectory points kept per body, overriding the scenario.
    #[arg(long)]
    history: Option<usize>,

    #[arg(long, default_value_t = 80)]
    width: usize,

    #[arg(long, default_value_t = 40)]
    height: usize,
}

fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_path(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => config::inner_solar_system(),
    };

    if args.history.is_some() {
        scenario.simulation.history = args.history;
    }

    Ok(scenario)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut simulation = load_scenario(&args)?.build()?;

    info!(
        bodies = simulation.bodies().len(),
        ticks = args.ticks,
        "running simulation"
    );

    let initial_energy = simulation.total_energy();
    simulation.run(args.ticks)?;

    let drift = simulation.total_energy() - initial_energy;
    let relative_drift = if initial_energy != 0.0 {
        (drift / initial_energy).abs()
    } else {
        drift.abs()
    };

    info!(
        days = simulation.elapsed() / DAY,
        energy_drift = relative_drift,
        "simulation finished"
    );

    let mut canvas = Canvas::fitting(args.width, args.height, &simulation);
    simulation.render(&mut canvas);
    print!("{canvas}");

    Ok(())
}
