//! Headless wildfire CA runner.
//!
//! Loads a scenario JSON produced by the grid-generation tools, advances the
//! automaton, and reports burn statistics. All simulation logic lives in
//! `wildfire-ca-core`; this binary owns process concerns only.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wildfire_ca_core::{CellState, Scenario, Simulation};

/// Wildfire spread simulation over a scenario grid
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Headless wildfire spread simulation", long_about = None)]
struct Args {
    /// Scenario JSON file produced by the grid generators
    scenario: PathBuf,

    /// Number of generations to run (default: until the fire exhausts itself)
    #[arg(short, long)]
    steps: Option<u64>,

    /// Override the scenario's random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override wind speed in m/s
    #[arg(short = 'w', long)]
    wind_speed: Option<f32>,

    /// Override wind direction as a vector x,y
    #[arg(short = 'd', long)]
    wind_dir: Option<String>,

    /// Print only the scar-size series, one burned-out count per line
    #[arg(long)]
    scar: bool,

    /// Report interval in generations
    #[arg(short, long, default_value_t = 1)]
    report_interval: u64,
}

fn parse_wind_dir(spec: &str) -> Result<(f32, f32), Box<dyn Error>> {
    let mut parts = spec.split(',').map(str::trim).map(str::parse::<f32>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok((x, y)),
        _ => Err(format!("invalid wind direction '{spec}', expected x,y").into()),
    }
}

fn report(simulation: &Simulation) {
    let grid = simulation.grid();
    println!(
        "gen {:>4}: {:>6} burning, {:>6} burned out",
        simulation.generation(),
        grid.state_count(CellState::Burning),
        grid.burned_out_count()
    );
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let contents = fs::read_to_string(&args.scenario)?;
    let mut scenario = Scenario::from_json(&contents)?;

    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(speed) = args.wind_speed {
        scenario.wind_speed = speed;
    }
    if let Some(spec) = &args.wind_dir {
        scenario.wind_dir = parse_wind_dir(spec)?;
    }

    let mut simulation = scenario.build_simulation()?;

    if args.scar {
        for burned in simulation.scar_size_series() {
            println!("{burned}");
        }
        return Ok(());
    }

    let (height, width) = simulation.grid().dimensions();
    println!(
        "{width}x{height} grid, wind {:.1} m/s, seed {}",
        scenario.wind_speed, scenario.seed
    );
    report(&simulation);

    let interval = args.report_interval.max(1);
    match args.steps {
        Some(steps) => {
            for _ in 0..steps {
                simulation.step();
                if simulation.generation() % interval == 0 {
                    report(&simulation);
                }
            }
        }
        None => {
            while simulation.grid().has_active_fire() {
                simulation.step();
                if simulation.generation() % interval == 0 {
                    report(&simulation);
                }
            }
        }
    }

    let grid = simulation.grid();
    println!(
        "done after {} generations: {} of {} cells burned out",
        simulation.generation(),
        grid.burned_out_count(),
        width * height
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
