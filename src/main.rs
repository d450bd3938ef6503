//! Critter World - CLI entry point
//!
//! Headless driver for the critter simulation.

use clap::{Parser, Subcommand};
use critterworld::{benchmark, Config, Kind, World};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "critterworld")]
#[command(version)]
#[command(about = "Turn-based critter simulation on a toroidal grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of turns to simulate
        #[arg(short, long, default_value = "1000")]
        turns: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the scoreboard history (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Run a performance benchmark
    Bench {
        /// Number of turns
        #[arg(short, long, default_value = "1000")]
        turns: u64,

        /// Starting critters of each kind
        #[arg(short, long, default_value = "25")]
        per_kind: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            turns,
            seed,
            output,
            quiet,
        } => run_simulation(config, turns, seed, output, quiet),

        Commands::Init { output } => generate_config(output),

        Commands::Bench { turns, per_kind } => run_benchmark(turns, per_kind),
    }
}

fn run_simulation(
    config_path: PathBuf,
    turns: u64,
    seed: Option<u64>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    // Create world
    let mut world = if let Some(s) = seed {
        println!("Using seed: {}", s);
        World::new_with_seed(config.clone(), s)?
    } else {
        World::new(config.clone())?
    };

    println!("Starting simulation");
    println!("  Initial population: {}", world.population());
    println!(
        "  Grid: {}x{} ({} food cells)",
        world.width(),
        world.height(),
        world.food_remaining()
    );
    println!("  Turns: {}", turns);
    println!();

    let start = Instant::now();
    let stats_interval = config.logging.stats_interval;

    for _ in 0..turns {
        world.step()?;

        if !quiet && world.turn() % stats_interval == 0 {
            println!("turn {:6} | {}", world.turn(), world.scores().summary());
        }

        if world.is_extinct() {
            println!("\nAll critters gone at turn {}", world.turn());
            break;
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Turns: {}", world.turn());
    println!(
        "Speed: {:.1} turns/s",
        world.turn() as f64 / elapsed.as_secs_f64()
    );
    println!("Seed: {}", world.seed());
    println!();

    for kind in Kind::ALL {
        let stats = world.scores().get(kind);
        println!(
            "{:8} alive: {:4}  wins: {:4}  eaten: {:4}  points: {:4}",
            kind.name(),
            stats.alive,
            stats.wins,
            stats.eaten,
            stats.total()
        );
    }

    if let Some(path) = output {
        world.history().save(path.to_string_lossy().as_ref())?;
        println!();
        println!("Scoreboard history: {:?}", path);
    }

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn run_benchmark(turns: u64, per_kind: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Critter World Benchmark ===");
    println!("Turns: {}", turns);
    println!("Per kind: {}", per_kind);
    println!();

    let result = benchmark(turns, per_kind)?;
    println!("{}", result);

    Ok(())
}
