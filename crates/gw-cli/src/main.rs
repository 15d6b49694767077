//! Command-line driver for the Grimmwald simulation.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gw",
    about = "Grimmwald: weather, creatures, and effects on a tick-driven wilderness map",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and report the outcome
    Simulate {
        /// Scenario file (default: the built-in demo)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Number of ticks to simulate (default: 24 = one day at 1 hour/tick)
        #[arg(short, long, default_value = "24")]
        ticks: u64,

        /// RNG seed, overriding the scenario's
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show every event, including routine movement
        #[arg(short, long)]
        verbose: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the global weather sequence
    Forecast {
        /// Number of ticks to forecast
        #[arg(short, long, default_value = "24")]
        ticks: u64,

        /// RNG seed for deterministic forecasts
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Weather at tick 0 (clear, cloudy, rain, storm, snow, heatwave, wind, drought)
        #[arg(long)]
        start: Option<String>,
    },

    /// Write the demo scenario to a file as a starting point
    Init {
        /// Where to write the scenario
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            ticks,
            seed,
            verbose,
            json,
        } => commands::simulate::run(scenario.as_deref(), ticks, seed, verbose, json),
        Commands::Forecast { ticks, seed, start } => {
            commands::forecast::run(ticks, seed, start.as_deref())
        }
        Commands::Init { path } => commands::init::run(&path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
