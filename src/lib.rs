//! # Critter World
//!
//! Turn-based simulation of grid-dwelling critters on a toroidal world.
//!
//! ## Features
//!
//! - **Synchronous turns**: one discrete resolution step at a time, driven
//!   by an external cadence
//! - **Pluggable behavior**: a closed set of critter kinds with their own
//!   movement, feeding, and fighting policies
//! - **Configurable**: YAML configuration files
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use critterworld::{Config, World};
//!
//! // Create a seeded world with the default config
//! let config = Config::default();
//! let mut world = World::new_with_seed(config, 42).unwrap();
//!
//! // Run the simulation
//! world.run(100).unwrap();
//!
//! // Check results
//! assert_eq!(world.turn(), 100);
//! println!("Population: {}", world.population());
//! println!("{}", world.scores().summary());
//! ```
//!
//! ## Rendering
//!
//! The engine exposes a read-only [`shared::WorldSnapshot`] after each
//! turn; a presentation layer renders snapshots and sends
//! [`shared::SimCommand`]s to a [`shared::SimulationHandle`] to start,
//! stop, step, and retime the simulation.

pub mod battle;
pub mod config;
pub mod critter;
pub mod error;
pub mod grid;
pub mod shared;
pub mod stats;
pub mod world;

// Re-export main types
pub use config::Config;
pub use critter::{Critter, CritterId, Kind};
pub use error::WorldError;
pub use world::World;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(turns: u64, per_kind: usize) -> Result<BenchmarkResult, WorldError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.population.grazers = per_kind;
    config.population.prowlers = per_kind;
    config.population.howlers = per_kind;
    config.population.sloths = per_kind;

    let mut world = World::new(config)?;

    let start = Instant::now();
    world.run(turns)?;
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        turns: world.turn(),
        initial_population: per_kind * Kind::ALL.len(),
        final_population: world.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        turns_per_second: world.turn() as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub turns: u64,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub turns_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Turns: {}", self.turns)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} turns/s", self.turns_per_second)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_quick_simulation() {
        let config = Config::default();
        let mut world = World::new_with_seed(config, 123).unwrap();

        world.run(100).unwrap();

        assert_eq!(world.turn(), 100);
    }

    #[test]
    fn test_benchmark() {
        let result = benchmark(50, 5).unwrap();

        assert_eq!(result.turns, 50);
        assert!(result.turns_per_second > 0.0);
    }
}
